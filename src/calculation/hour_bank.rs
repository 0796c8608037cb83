//! Hour bank (banco de horas) ledger calculation.

use tracing::debug;

use crate::config::HourBankConfig;
use crate::format::{format_minutes, format_signed_minutes};
use crate::models::{
    BankEntry, DiagnosticCode, Diagnostics, MonthlyWorkHoursCalculation, ReasonCode,
    WorkTimeBankCalculation,
};

/// Builds the month's hour-bank ledger from its daily calculations.
///
/// Each day is classified independently:
///
/// | Condition              | Entry  | Reason                       |
/// |------------------------|--------|------------------------------|
/// | overtime > 0           | credit | [`ReasonCode::Overtime`]     |
/// | delay > 0              | debit  | [`ReasonCode::Delay`]        |
/// | early departure > 0    | debit  | [`ReasonCode::EarlyDeparture`] |
/// | not complete           | debit  | [`ReasonCode::Absence`]      |
///
/// An incomplete day is debited `absence_debit_minutes` in full, whatever
/// was recorded that day. `balance` is always `total_credits - total_debits`.
pub fn calculate_hour_bank(
    monthly: &MonthlyWorkHoursCalculation,
    config: &HourBankConfig,
) -> WorkTimeBankCalculation {
    let mut credits = Vec::new();
    let mut debits = Vec::new();

    for day in monthly.daily_calculations() {
        if day.overtime_minutes > 0 {
            credits.push(BankEntry::new(
                day.date,
                day.overtime_minutes,
                ReasonCode::Overtime,
            ));
        }
        if day.delay_minutes > 0 {
            debits.push(BankEntry::new(day.date, day.delay_minutes, ReasonCode::Delay));
        }
        if day.early_departure_minutes > 0 {
            debits.push(BankEntry::new(
                day.date,
                day.early_departure_minutes,
                ReasonCode::EarlyDeparture,
            ));
        }
        if !day.is_complete {
            debits.push(BankEntry::new(
                day.date,
                config.absence_debit_minutes,
                ReasonCode::Absence,
            ));
        }
    }

    let total_credits: i64 = credits.iter().map(|e| e.minutes).sum();
    let total_debits: i64 = debits.iter().map(|e| e.minutes).sum();
    let balance = total_credits - total_debits;

    let mut diagnostics = Diagnostics::default();
    if balance < 0 {
        diagnostics.warn(
            DiagnosticCode::NegativeBalance,
            format!(
                "Saldo negativo no banco de horas: {}",
                format_signed_minutes(balance)
            ),
            None,
        );
    }
    if total_credits > config.credit_limit_minutes {
        diagnostics.warn(
            DiagnosticCode::CreditAccumulationExceeded,
            format!(
                "Acúmulo de horas extras ({}) acima do permitido ({})",
                format_minutes(total_credits),
                format_minutes(config.credit_limit_minutes)
            ),
            None,
        );
    }
    diagnostics.absorb(&monthly.diagnostics);

    debug!(
        employee_id = %monthly.employee_id,
        total_credits,
        total_debits,
        balance,
        "Hour bank calculated"
    );

    WorkTimeBankCalculation {
        employee_id: monthly.employee_id.clone(),
        year: monthly.year,
        month: monthly.month,
        total_credits,
        total_debits,
        balance,
        credits,
        debits,
        diagnostics,
    }
}
