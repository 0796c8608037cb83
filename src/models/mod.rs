//! Core data models for the Ponto Engine.
//!
//! This module contains the clock event input type and every result type the
//! calculation pipeline produces.

mod diagnostics;
mod hour_bank;
mod salary;
mod time_record;
mod work_hours;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
pub use hour_bank::{BankEntry, ReasonCode, WorkTimeBankCalculation};
pub use salary::ProportionalSalaryCalculation;
pub use time_record::{RecordType, TimeRecord};
pub use work_hours::{
    DayCounters, MinuteTotals, MonthlyWorkHoursCalculation, WeeklyWorkHoursCalculation,
    WorkHoursCalculation,
};
