//! Hour bank (banco de horas) ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Diagnostics;

/// Why a ledger entry was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Overtime credited to the bank.
    Overtime,
    /// Late arrival debited from the bank.
    Delay,
    /// Early departure debited from the bank.
    EarlyDeparture,
    /// Incomplete day debited as a full absence.
    Absence,
}

impl ReasonCode {
    /// Display label used on ledger reports.
    ///
    /// ```
    /// use ponto_engine::models::ReasonCode;
    ///
    /// assert_eq!(ReasonCode::EarlyDeparture.label(), "Saída Antecipada");
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            ReasonCode::Overtime => "Horas Extras",
            ReasonCode::Delay => "Atraso",
            ReasonCode::EarlyDeparture => "Saída Antecipada",
            ReasonCode::Absence => "Falta",
        }
    }
}

/// One credit or debit in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    /// The day the entry originates from.
    pub date: NaiveDate,
    /// Minutes credited or debited (always non-negative).
    pub minutes: i64,
    /// Why the entry exists.
    pub reason: ReasonCode,
    /// Display label for `reason`.
    pub label: String,
}

impl BankEntry {
    /// Builds an entry whose label matches its reason.
    pub fn new(date: NaiveDate, minutes: i64, reason: ReasonCode) -> Self {
        Self {
            date,
            minutes,
            reason,
            label: reason.label().to_string(),
        }
    }
}

/// The hour bank for one employee over one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeBankCalculation {
    /// The employee.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Σ of the credit entries.
    pub total_credits: i64,
    /// Σ of the debit entries.
    pub total_debits: i64,
    /// `total_credits - total_debits`.
    pub balance: i64,
    /// Credit entries in day order.
    pub credits: Vec<BankEntry>,
    /// Debit entries in day order.
    pub debits: Vec<BankEntry>,
    /// Own warnings followed by the monthly diagnostics.
    pub diagnostics: Diagnostics,
}
