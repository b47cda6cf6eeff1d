//! Salary computation engine.
//!
//! The `engine` module turns a [`TimesheetInput`] into a
//! [`PayrollBreakdown`]: validate, compute the base result, merge the
//! holiday premium into combined totals, estimate the advance. All of
//! it is pure and synchronous; persistence belongs to the history
//! ledger and never happens here. Formula variants are delegated to a
//! [`PayrollRules`] implementation.

use crate::models::{
    AdvanceEstimate, CombinedTotals, HolidayPremium, PayrollBreakdown, PayrollResult,
    TimesheetInput,
};
use crate::rules::PayrollRules;
use thiserror::Error;

/// A field-scoped input violation. Always recoverable by correcting
/// the input; the engine raises nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("salary must be a number ≥ 0")]
    Salary,
    #[error("required hours must be a number > 0")]
    NormHours,
    #[error("worked hours must be a number ≥ 0")]
    WorkedHours,
    #[error("night hours must be a number ≥ 0")]
    NightHours,
    #[error("night hours cannot exceed worked hours")]
    NightExceedsWorked,
    #[error("holiday night shifts cannot exceed holiday shifts")]
    HolidayNightExceedsShifts,
    #[error("first-half hours must be a number ≥ 0")]
    FirstHalfHours,
    #[error("first-half night hours must be a number ≥ 0")]
    FirstHalfNightHours,
    #[error("first-half night hours cannot exceed first-half hours")]
    FirstHalfNightExceedsHours,
}

/// Checks the core salary fields in order; the first violation wins
/// and no partial result is ever produced.
///
/// The comparisons are written negated (`!(x >= 0.0)`) so that the
/// NaN sentinel from [`crate::parse::parse_number`] fails whichever
/// field it landed in.
fn validate_core(input: &TimesheetInput) -> Result<(), ValidationError> {
    if !(input.salary >= 0.0) {
        return Err(ValidationError::Salary);
    }
    if !(input.norm_hours > 0.0) {
        return Err(ValidationError::NormHours);
    }
    if !(input.worked_hours >= 0.0) {
        return Err(ValidationError::WorkedHours);
    }
    if !(input.night_hours >= 0.0) {
        return Err(ValidationError::NightHours);
    }
    if input.night_hours > input.worked_hours {
        return Err(ValidationError::NightExceedsWorked);
    }
    Ok(())
}

/// Validates every invariant on the input: the core fields, then the
/// holiday counters when the premium is enabled, then the optional
/// first-half fields.
pub fn validate(input: &TimesheetInput) -> Result<(), ValidationError> {
    validate_core(input)?;
    if input.holiday_enabled && input.holiday_night_shifts > input.holiday_shifts {
        return Err(ValidationError::HolidayNightExceedsShifts);
    }
    let first_half = input.first_half_hours.unwrap_or(0.0);
    let first_half_night = input.first_half_night_hours.unwrap_or(0.0);
    if !(first_half >= 0.0) {
        return Err(ValidationError::FirstHalfHours);
    }
    if !(first_half_night >= 0.0) {
        return Err(ValidationError::FirstHalfNightHours);
    }
    if first_half_night > first_half {
        return Err(ValidationError::FirstHalfNightExceedsHours);
    }
    Ok(())
}

/// Computes the base payroll result for validated core fields.
///
/// Only the five core checks run here; callers that carry holiday or
/// first-half data go through [`run_payroll`], which validates the
/// whole input first.
pub fn compute_salary(
    input: &TimesheetInput,
    rules: &dyn PayrollRules,
) -> Result<PayrollResult, ValidationError> {
    validate_core(input)?;
    Ok(compute_result(input, rules))
}

/// The arithmetic itself. Callers must have validated the input;
/// norm_hours > 0 in particular, so no division here can blow up.
fn compute_result(input: &TimesheetInput, rules: &dyn PayrollRules) -> PayrollResult {
    let base_rate = input.salary / input.norm_hours;
    let base_fact = base_rate * input.worked_hours;
    let bonus = rules.bonus(input.salary, input.norm_hours, input.worked_hours);
    let night_extra = base_rate * input.night_hours * crate::rules::NIGHT_EXTRA_RATE;

    let gross = base_fact + bonus + night_extra;
    let tax = gross * rules.tax_rate();
    let net = gross - tax;

    PayrollResult {
        hour_rate: rules.display_hour_rate(input.salary, input.norm_hours),
        base_fact,
        bonus,
        night_extra,
        gross,
        tax,
        net,
    }
}

/// Splits a holiday extra-gross amount into a [`HolidayPremium`]
/// using the same tax rate as the main result.
fn split_premium(extra_gross: f64, tax_rate: f64) -> HolidayPremium {
    let tax = extra_gross * tax_rate;
    HolidayPremium {
        extra_gross,
        tax,
        net: extra_gross - tax,
    }
}

/// Runs the whole pipeline: validate, compute the base result, merge
/// the holiday premium, estimate the advance.
///
/// The holiday premium is computed only when enabled and at least one
/// holiday shift was worked. The advance is `None` when neither
/// first-half field was supplied; a reported zero advance and "no
/// advance data" are different answers.
pub fn run_payroll(
    input: &TimesheetInput,
    rules: &dyn PayrollRules,
) -> Result<PayrollBreakdown, ValidationError> {
    validate(input)?;
    let result = compute_result(input, rules);

    let holiday = if input.holiday_enabled && input.holiday_shifts > 0 {
        let extra_gross = rules.holiday_extra_gross(
            input.salary,
            input.norm_hours,
            input.holiday_shifts,
            input.holiday_night_shifts,
        );
        Some(split_premium(extra_gross, rules.tax_rate()))
    } else {
        None
    };

    let totals = match &holiday {
        Some(premium) => CombinedTotals {
            gross: result.gross + premium.extra_gross,
            tax: result.tax + premium.tax,
            net: result.net + premium.net,
        },
        None => CombinedTotals {
            gross: result.gross,
            tax: result.tax,
            net: result.net,
        },
    };

    let advance = match (input.first_half_hours, input.first_half_night_hours) {
        (None, None) => None,
        (fh, fhn) => {
            let advance = rules.advance_approx_net(
                input.salary,
                input.norm_hours,
                fh.unwrap_or(0.0),
                fhn.unwrap_or(0.0),
            );
            Some(AdvanceEstimate {
                advance,
                remaining: totals.net - advance,
            })
        }
    };

    Ok(PayrollBreakdown {
        result,
        holiday,
        totals,
        advance,
    })
}
