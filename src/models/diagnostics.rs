//! Warnings and errors carried on every calculation result.
//!
//! The engine never fails a calculation because of bad clock data. Instead
//! each result embeds a [`Diagnostics`] value split by severity, and each
//! aggregation level copies the diagnostics of the level below it so nothing
//! is lost on the way up to payroll.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Machine-readable identifier for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// The day had no clock records at all.
    NoRecords,
    /// No ENTRY punch was found for the day. Fatal for that day.
    EntryNotFound,
    /// No EXIT punch was found for the day.
    MissingExit,
    /// The EXIT punch precedes the ENTRY punch.
    ExitBeforeEntry,
    /// The break lasted longer or shorter than the policy allows.
    BreakDurationDeviation,
    /// Daily overtime above the soft cap.
    DailyOvertimeExceeded,
    /// Entry after the reference start beyond tolerance.
    Late,
    /// Exit before the reference end beyond tolerance.
    EarlyDeparture,
    /// An aggregation level received no input.
    NoCalculations,
    /// More days worked in the week than the policy schedules.
    ExtraWorkDays,
    /// Weekly overtime above the policy cap.
    WeeklyOvertimeExceeded,
    /// Monthly overtime above the 44h legal cap.
    MonthlyOvertimeExceeded,
    /// The employee missed scheduled days.
    Absences,
    /// The employee arrived late on one or more days.
    LateArrivals,
    /// The employee left early on one or more days.
    EarlyDepartures,
    /// Attendance rate under 80%.
    LowAttendance,
    /// The salary policy failed validation. Money fields are zero.
    InvalidSalaryPolicy,
    /// Hour bank balance is negative.
    NegativeBalance,
    /// Hour bank credits above the permitted accumulation.
    CreditAccumulationExceeded,
}

/// A single warning or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What was detected.
    pub code: DiagnosticCode,
    /// Human-readable (pt-BR) description for reviewers.
    pub message: String,
    /// The day the diagnostic refers to, when it is tied to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Warnings and errors attached to a calculation result.
///
/// # Example
///
/// ```
/// use ponto_engine::models::{DiagnosticCode, Diagnostics};
///
/// let mut diagnostics = Diagnostics::default();
/// diagnostics.warn(DiagnosticCode::Late, "Atraso de 20min", None);
/// assert!(diagnostics.has_warning(DiagnosticCode::Late));
/// assert!(!diagnostics.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Degraded conditions: the result is usable but needs review.
    pub warnings: Vec<Diagnostic>,
    /// Fatal-for-unit conditions: the result must not feed payroll unreviewed.
    pub errors: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Records a warning.
    pub fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>, date: Option<NaiveDate>) {
        self.warnings.push(Diagnostic {
            code,
            message: message.into(),
            date,
        });
    }

    /// Records an error.
    pub fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, date: Option<NaiveDate>) {
        self.errors.push(Diagnostic {
            code,
            message: message.into(),
            date,
        });
    }

    /// Appends every warning and error of `other`, preserving order.
    pub fn absorb(&mut self, other: &Diagnostics) {
        self.warnings.extend(other.warnings.iter().cloned());
        self.errors.extend(other.errors.iter().cloned());
    }

    /// Returns true if any error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: DiagnosticCode) -> bool {
        self.warnings.iter().any(|d| d.code == code)
    }

    /// Returns true if an error with the given code was recorded.
    pub fn has_error(&self, code: DiagnosticCode) -> bool {
        self.errors.iter().any(|d| d.code == code)
    }
}
