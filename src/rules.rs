//! Payroll rule strategies.
//!
//! The `rules` module defines the [`PayrollRules`] trait, which
//! isolates the formula variants that have historically changed
//! between revisions (bonus base, display hour rate, holiday premium,
//! advance estimation) behind one seam. Call sites in the engine take
//! `&dyn PayrollRules`, so swapping a formula revision never touches
//! them. [`StandardRules`] implements the current revision.

/// Bonus as a fraction of nominal salary at full attendance.
pub const BONUS_RATE: f64 = 0.35;
/// Flat income tax withheld from gross pay.
pub const TAX_RATE: f64 = 0.13;
/// Night hours earn this fraction of the base rate on top.
pub const NIGHT_EXTRA_RATE: f64 = 0.4;

/// Fixed length of a holiday shift, in hours.
pub const HOLIDAY_SHIFT_HOURS: f64 = 11.0;
/// Hours within a night holiday shift that also earn the night premium.
pub const HOLIDAY_NIGHT_HOURS: f64 = 7.0;
/// Holiday shifts are paid at this multiple of the normal rate; only
/// the portion above 1x is added by the premium (the base pay for
/// those hours is already counted in worked hours).
pub const HOLIDAY_PAY_MULTIPLIER: f64 = 2.0;

/// A set of payroll formulas. Implementations must be thread-safe
/// (`Send + Sync`) because the API layer shares one instance across
/// request handlers.
pub trait PayrollRules: Send + Sync {
    /// Tax rate used for every gross/net split.
    fn tax_rate(&self) -> f64 {
        TAX_RATE
    }

    /// Performance bonus, gross. `worked_hours / norm_hours` is the
    /// attendance ratio.
    fn bonus(&self, salary: f64, norm_hours: f64, worked_hours: f64) -> f64;

    /// Hourly rate shown in the UI. Display only.
    fn display_hour_rate(&self, salary: f64, norm_hours: f64) -> f64;

    /// Extra gross for holiday shifts, above the base pay already
    /// counted in worked hours.
    fn holiday_extra_gross(
        &self,
        salary: f64,
        norm_hours: f64,
        holiday_shifts: u32,
        holiday_night_shifts: u32,
    ) -> f64;

    /// Net advance estimated from first-half hours. Excludes bonus by
    /// design: mid-period advances conventionally leave out variable
    /// pay.
    fn advance_approx_net(
        &self,
        salary: f64,
        norm_hours: f64,
        first_half_hours: f64,
        first_half_night_hours: f64,
    ) -> f64;
}

/// The current formula revision.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRules;

impl PayrollRules for StandardRules {
    /// Bonus tracks the attendance ratio against the nominal salary,
    /// not against pay for hours actually worked. The two bases
    /// coincide at full attendance but diverge otherwise; do not
    /// conflate them.
    fn bonus(&self, salary: f64, norm_hours: f64, worked_hours: f64) -> f64 {
        salary * BONUS_RATE * (worked_hours / norm_hours)
    }

    /// Net-equivalent hourly rate including bonus and tax withholding.
    fn display_hour_rate(&self, salary: f64, norm_hours: f64) -> f64 {
        salary * (1.0 + BONUS_RATE) * (1.0 - TAX_RATE) / norm_hours
    }

    fn holiday_extra_gross(
        &self,
        salary: f64,
        norm_hours: f64,
        holiday_shifts: u32,
        holiday_night_shifts: u32,
    ) -> f64 {
        let day_shifts = holiday_shifts.saturating_sub(holiday_night_shifts);
        let night_shifts = holiday_night_shifts;

        let hour_rate = salary / norm_hours;
        let hour_rate_with_bonus = salary * (1.0 + BONUS_RATE) / norm_hours;

        let day_shift_gross = hour_rate_with_bonus * HOLIDAY_SHIFT_HOURS;
        let night_shift_gross = hour_rate_with_bonus * HOLIDAY_SHIFT_HOURS
            + hour_rate * NIGHT_EXTRA_RATE * HOLIDAY_NIGHT_HOURS;

        (day_shift_gross * day_shifts as f64 + night_shift_gross * night_shifts as f64)
            * (HOLIDAY_PAY_MULTIPLIER - 1.0)
    }

    fn advance_approx_net(
        &self,
        salary: f64,
        norm_hours: f64,
        first_half_hours: f64,
        first_half_night_hours: f64,
    ) -> f64 {
        let base_net_hourly = salary * (1.0 - TAX_RATE) / norm_hours;
        let night_extra_net_hourly = (salary / norm_hours) * NIGHT_EXTRA_RATE * (1.0 - TAX_RATE);
        base_net_hourly * first_half_hours + night_extra_net_hourly * first_half_night_hours
    }
}
