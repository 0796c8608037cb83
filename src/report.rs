//! Display views over the calculation results.
//!
//! Each view pairs the numeric fields of a result with the pre-formatted
//! strings that report renderers and payroll exports print as-is. Views are
//! built with `From<&T>` and never recompute anything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::EmployeeMonthReport;
use crate::format::{
    format_currency_brl, format_hours, format_minutes, format_percentage, format_signed_minutes,
};
use crate::models::{
    BankEntry, MonthlyWorkHoursCalculation, ProportionalSalaryCalculation, RecordType,
    WorkHoursCalculation, WorkTimeBankCalculation,
};

/// `MM/YYYY`, the period label used in every report header.
fn period_label(year: i32, month: u32) -> String {
    format!("{:02}/{}", month, year)
}

/// One line of the daily timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReportRow {
    /// The calendar day.
    pub date: NaiveDate,
    /// The day as `DD/MM/YYYY`.
    pub date_label: String,
    /// ENTRY punch as `HH:MM`.
    pub entry: Option<String>,
    /// EXIT punch as `HH:MM`.
    pub exit: Option<String>,
    /// Worked time.
    pub total: String,
    /// Regular time.
    pub regular: String,
    /// Overtime.
    pub overtime: String,
    /// Break deducted.
    pub break_time: String,
    /// Time inside the night window.
    pub night_shift: String,
    /// Late arrival.
    pub delay: String,
    /// Early departure.
    pub early_departure: String,
    /// `Completo`, `Incompleto` or `Erro`.
    pub status: String,
    /// Messages of every warning and error of the day.
    pub notes: Vec<String>,
}

impl From<&WorkHoursCalculation> for DailyReportRow {
    fn from(day: &WorkHoursCalculation) -> Self {
        let punch = |record_type: RecordType| {
            day.records
                .iter()
                .find(|r| r.record_type == record_type)
                .map(|r| r.timestamp.format("%H:%M").to_string())
        };

        let status = if day.diagnostics.has_errors() {
            "Erro"
        } else if day.is_complete {
            "Completo"
        } else {
            "Incompleto"
        };

        let notes = day
            .diagnostics
            .errors
            .iter()
            .chain(day.diagnostics.warnings.iter())
            .map(|d| d.message.clone())
            .collect();

        Self {
            date: day.date,
            date_label: day.date.format("%d/%m/%Y").to_string(),
            entry: punch(RecordType::Entry),
            exit: punch(RecordType::Exit),
            total: format_minutes(day.total_minutes),
            regular: format_minutes(day.regular_minutes),
            overtime: format_minutes(day.overtime_minutes),
            break_time: format_minutes(day.break_minutes),
            night_shift: format_minutes(day.night_shift_minutes),
            delay: format_minutes(day.delay_minutes),
            early_departure: format_minutes(day.early_departure_minutes),
            status: status.to_string(),
            notes,
        }
    }
}

/// Header block of the monthly timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummaryView {
    /// The employee.
    pub employee_id: String,
    /// `MM/YYYY`.
    pub period: String,
    /// Days with a calculation.
    pub work_days: u32,
    /// Days with entry and exit.
    pub complete_days: u32,
    /// Days flagged late.
    pub late_days: u32,
    /// Days flagged as early departure.
    pub early_departure_days: u32,
    /// Worked time (regular + overtime).
    pub worked: String,
    /// Regular time.
    pub regular: String,
    /// Overtime.
    pub overtime: String,
    /// Night-shift time.
    pub night_shift: String,
    /// Total lateness.
    pub delay: String,
    /// Total early departure.
    pub early_departure: String,
    /// Average worked time per day.
    pub average_per_day: String,
    /// Attendance rate, e.g. `95,5%`.
    pub attendance_rate: String,
    /// Punctuality rate, e.g. `90,0%`.
    pub punctuality_rate: String,
    /// Number of warnings, including those of every day.
    pub warning_count: usize,
    /// Number of errors, including those of every day.
    pub error_count: usize,
}

impl From<&MonthlyWorkHoursCalculation> for MonthlySummaryView {
    fn from(month: &MonthlyWorkHoursCalculation) -> Self {
        let totals = &month.totals;
        Self {
            employee_id: month.employee_id.clone(),
            period: period_label(month.year, month.month),
            work_days: month.counters.work_days,
            complete_days: month.counters.complete_days,
            late_days: month.counters.late_days,
            early_departure_days: month.counters.early_departure_days,
            worked: format_minutes(totals.worked_minutes()),
            regular: format_minutes(totals.regular_minutes),
            overtime: format_minutes(totals.overtime_minutes),
            night_shift: format_minutes(totals.night_shift_minutes),
            delay: format_minutes(totals.delay_minutes),
            early_departure: format_minutes(totals.early_departure_minutes),
            average_per_day: format_hours(month.average_hours_per_day),
            attendance_rate: format_percentage(month.attendance_rate),
            punctuality_rate: format_percentage(month.punctuality_rate),
            warning_count: month.diagnostics.warnings.len(),
            error_count: month.diagnostics.errors.len(),
        }
    }
}

/// Payslip-style breakdown of the proportional salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryView {
    /// The employee.
    pub employee_id: String,
    /// `MM/YYYY`.
    pub period: String,
    /// Expected monthly workload, e.g. `176h`.
    pub expected_workload: String,
    /// Worked time.
    pub worked: String,
    /// Attendance rate.
    pub attendance_rate: String,
    /// Base salary.
    pub base_salary: String,
    /// Hourly rate.
    pub hourly_rate: String,
    /// Daily rate.
    pub daily_rate: String,
    /// Salary prorated by attendance.
    pub proportional_salary: String,
    /// Overtime hours.
    pub overtime_hours: String,
    /// Overtime premium.
    pub overtime_value: String,
    /// Night-shift hours.
    pub night_shift_hours: String,
    /// Night-shift premium.
    pub night_shift_value: String,
    /// Absences (may be negative).
    pub absences: i64,
    /// Absence discount.
    pub absences_discount: String,
    /// Late days.
    pub late_days: u32,
    /// Late discount.
    pub late_discount: String,
    /// Early departure days.
    pub early_departures: u32,
    /// Early departure discount.
    pub early_departure_discount: String,
    /// Sum of the discounts.
    pub total_discounts: String,
    /// Final salary.
    pub final_salary: String,
}

impl From<&ProportionalSalaryCalculation> for SalaryView {
    fn from(salary: &ProportionalSalaryCalculation) -> Self {
        Self {
            employee_id: salary.employee_id.clone(),
            period: period_label(salary.year, salary.month),
            expected_workload: format_minutes(salary.total_expected_minutes),
            worked: format_minutes(salary.total_worked_minutes),
            attendance_rate: format_percentage(salary.attendance_rate),
            base_salary: format_currency_brl(salary.base_salary),
            hourly_rate: format_currency_brl(salary.hourly_rate),
            daily_rate: format_currency_brl(salary.daily_rate),
            proportional_salary: format_currency_brl(salary.proportional_salary),
            overtime_hours: format_hours(salary.overtime_hours),
            overtime_value: format_currency_brl(salary.overtime_value),
            night_shift_hours: format_hours(salary.night_shift_hours),
            night_shift_value: format_currency_brl(salary.night_shift_value),
            absences: salary.absences,
            absences_discount: format_currency_brl(salary.absences_discount),
            late_days: salary.late_days,
            late_discount: format_currency_brl(salary.late_discount),
            early_departures: salary.early_departures,
            early_departure_discount: format_currency_brl(salary.early_departure_discount),
            total_discounts: format_currency_brl(salary.total_discounts),
            final_salary: format_currency_brl(salary.final_salary),
        }
    }
}

/// One hour-bank ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntryRow {
    /// The day as `DD/MM/YYYY`.
    pub date: String,
    /// Reason label, e.g. `Atraso`.
    pub reason: String,
    /// Duration.
    pub duration: String,
}

impl From<&BankEntry> for BankEntryRow {
    fn from(entry: &BankEntry) -> Self {
        Self {
            date: entry.date.format("%d/%m/%Y").to_string(),
            reason: entry.label.clone(),
            duration: format_minutes(entry.minutes),
        }
    }
}

/// The hour-bank statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBankView {
    /// The employee.
    pub employee_id: String,
    /// `MM/YYYY`.
    pub period: String,
    /// Sum of credits.
    pub total_credits: String,
    /// Sum of debits.
    pub total_debits: String,
    /// Signed balance, e.g. `-7h 20min`.
    pub balance: String,
    /// True when the balance is negative.
    pub is_negative: bool,
    /// Credit lines.
    pub credits: Vec<BankEntryRow>,
    /// Debit lines.
    pub debits: Vec<BankEntryRow>,
}

impl From<&WorkTimeBankCalculation> for HourBankView {
    fn from(bank: &WorkTimeBankCalculation) -> Self {
        Self {
            employee_id: bank.employee_id.clone(),
            period: period_label(bank.year, bank.month),
            total_credits: format_minutes(bank.total_credits),
            total_debits: format_minutes(bank.total_debits),
            balance: format_signed_minutes(bank.balance),
            is_negative: bank.balance < 0,
            credits: bank.credits.iter().map(BankEntryRow::from).collect(),
            debits: bank.debits.iter().map(BankEntryRow::from).collect(),
        }
    }
}

/// Every view of one employee-month, as served by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReportView {
    /// Timesheet header.
    pub summary: MonthlySummaryView,
    /// Timesheet lines, in date order.
    pub days: Vec<DailyReportRow>,
    /// Payslip breakdown.
    pub salary: SalaryView,
    /// Hour-bank statement.
    pub hour_bank: HourBankView,
}

impl From<&EmployeeMonthReport> for MonthReportView {
    fn from(report: &EmployeeMonthReport) -> Self {
        Self {
            summary: MonthlySummaryView::from(&report.monthly),
            days: report
                .monthly
                .daily_calculations()
                .map(DailyReportRow::from)
                .collect(),
            salary: SalaryView::from(&report.salary),
            hour_bank: HourBankView::from(&report.hour_bank),
        }
    }
}
