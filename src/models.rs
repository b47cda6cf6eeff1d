//! Data models for the Salary Engine.
//!
//! The `models` module defines the serialisable structs that form the
//! engine's input and output. All types derive `Serialize` and
//! `Deserialize` (camelCase on the wire, matching the JSON the form
//! frontend produces) so they can be persisted or transmitted as-is.
//! Inputs and results are transient values owned by the caller; only
//! [`HistoryEntry`] and [`SavedInput`] are ever persisted.

use serde::{Deserialize, Serialize};

/// Timesheet figures for one pay period, as entered by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetInput {
    /// Nominal monthly base pay (the salary base), ≥ 0.
    pub salary: f64,
    /// Official required hours for the period, > 0.
    pub norm_hours: f64,
    /// Hours actually worked, ≥ 0.
    pub worked_hours: f64,
    /// Subset of `worked_hours` performed at night, ≤ `worked_hours`.
    pub night_hours: f64,
    /// Whether the holiday-shift premium applies.
    #[serde(default)]
    pub holiday_enabled: bool,
    /// Number of holiday shifts worked. Only meaningful when
    /// `holiday_enabled` is set.
    #[serde(default)]
    pub holiday_shifts: u32,
    /// Subset of `holiday_shifts` that were night shifts.
    #[serde(default)]
    pub holiday_night_shifts: u32,
    /// Hours worked in the first half of the period, used only to
    /// estimate the advance payment. `None` means the field was not
    /// supplied, which is distinct from an explicit zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_half_hours: Option<f64>,
    /// Night hours within `first_half_hours`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_half_night_hours: Option<f64>,
}

/// Breakdown of the base salary computation, before the holiday
/// premium is merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResult {
    /// Net-equivalent hourly rate shown in the UI. Display only; no
    /// downstream arithmetic uses it.
    pub hour_rate: f64,
    /// Gross pay for hours actually worked at the base rate.
    pub base_fact: f64,
    /// Performance bonus, gross.
    pub bonus: f64,
    /// Night-shift premium, gross.
    pub night_extra: f64,
    /// `base_fact + bonus + night_extra`.
    pub gross: f64,
    /// `gross * TAX_RATE`.
    pub tax: f64,
    /// `gross - tax`.
    pub net: f64,
}

/// The holiday-shift premium, computed separately from the base
/// result and merged into [`CombinedTotals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayPremium {
    /// Extra gross for holiday shifts (the portion above normal pay).
    pub extra_gross: f64,
    pub tax: f64,
    pub net: f64,
}

/// Totals with the holiday premium merged in. This is what gets
/// persisted to history and displayed as the headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTotals {
    pub gross: f64,
    pub tax: f64,
    pub net: f64,
}

/// Mid-period advance estimated from first-half hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceEstimate {
    /// Estimated advance, net of tax. Excludes bonus and holiday
    /// premium.
    pub advance: f64,
    /// Combined net minus the advance.
    pub remaining: f64,
}

/// Complete output of one payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBreakdown {
    /// Base computation, before the holiday merge.
    pub result: PayrollResult,
    /// Holiday premium, present when holiday shifts were worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<HolidayPremium>,
    /// Combined totals (base + holiday premium).
    pub totals: CombinedTotals,
    /// Advance estimate; `None` when no first-half hours were
    /// supplied, so the UI can show "—" instead of a misleading ₽0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance: Option<AdvanceEstimate>,
}

/// One persisted history record: the input snapshot together with the
/// combined totals it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub input: TimesheetInput,
    pub result: CombinedTotals,
}

/// The most recent input, saved for prefill on next load. A single
/// overwritten record, not a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedInput {
    pub input: TimesheetInput,
    /// Save time, milliseconds since the Unix epoch.
    pub saved_at: u64,
}

impl TimesheetInput {
    /// Input with only the four core fields set; holiday and
    /// first-half fields take their defaults.
    pub fn basic(salary: f64, norm_hours: f64, worked_hours: f64, night_hours: f64) -> Self {
        Self {
            salary,
            norm_hours,
            worked_hours,
            night_hours,
            holiday_enabled: false,
            holiday_shifts: 0,
            holiday_night_shifts: 0,
            first_half_hours: None,
            first_half_night_hours: None,
        }
    }
}
