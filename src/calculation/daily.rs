//! Daily work-hour calculation.
//!
//! This module reduces the clock punches of one employee-day into a
//! [`WorkHoursCalculation`]: total, regular, overtime, break and night-shift
//! minutes plus lateness and early departure against the reference window.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::config::WorkHoursConfig;
use crate::format::format_minutes;
use crate::models::{DiagnosticCode, RecordType, TimeRecord, WorkHoursCalculation};

use super::night_shift::calculate_night_shift_minutes;

/// Calculates the work hours of one employee on one calendar day.
///
/// Records may arrive in any order. They are sorted by timestamp and the
/// first punch of each type wins, so a duplicated ENTRY or EXIT never
/// changes the result.
///
/// This function never fails. Bad clock data is reported through the
/// result's diagnostics:
///
/// - no records: warning, zero-valued day
/// - no ENTRY: error, zero-valued day that must not feed payroll
/// - no EXIT, or an EXIT before the ENTRY: warning, incomplete zero-valued day
///
/// # Arguments
///
/// * `date` - The calendar day being calculated
/// * `employee_id` - The employee the records belong to
/// * `records` - Every punch of the employee for the day
/// * `config` - The work-hour policy
///
/// # Example
///
/// ```
/// use ponto_engine::calculation::calculate_daily_hours;
/// use ponto_engine::config::WorkHoursConfig;
/// use ponto_engine::models::{RecordType, TimeRecord};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let punch = |id: &str, record_type, h, m| TimeRecord {
///     id: id.to_string(),
///     record_type,
///     timestamp: date.and_hms_opt(h, m, 0).unwrap(),
///     employee_id: "emp_001".to_string(),
/// };
/// let records = vec![
///     punch("r1", RecordType::Entry, 8, 0),
///     punch("r2", RecordType::BreakStart, 12, 0),
///     punch("r3", RecordType::BreakEnd, 13, 0),
///     punch("r4", RecordType::Exit, 17, 0),
/// ];
///
/// let day = calculate_daily_hours(date, "emp_001", &records, &WorkHoursConfig::default());
/// assert_eq!(day.total_minutes, 480);
/// assert_eq!(day.break_minutes, 60);
/// assert!(day.is_complete);
/// ```
pub fn calculate_daily_hours(
    date: NaiveDate,
    employee_id: &str,
    records: &[TimeRecord],
    config: &WorkHoursConfig,
) -> WorkHoursCalculation {
    let mut calc = WorkHoursCalculation::empty(date, employee_id);

    if records.is_empty() {
        calc.diagnostics.warn(
            DiagnosticCode::NoRecords,
            "Nenhum registro encontrado",
            Some(date),
        );
        return calc;
    }

    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.timestamp);
    calc.records = sorted;

    let entry = first_of(&calc.records, RecordType::Entry);
    let exit = first_of(&calc.records, RecordType::Exit);
    let break_start = first_of(&calc.records, RecordType::BreakStart);
    let break_end = first_of(&calc.records, RecordType::BreakEnd);

    let Some(entry) = entry else {
        warn!(employee_id, %date, "Entry record not found");
        calc.diagnostics.error(
            DiagnosticCode::EntryNotFound,
            "Registro de entrada não encontrado",
            Some(date),
        );
        return calc;
    };

    let exit = match exit {
        Some(exit) if exit >= entry => exit,
        Some(_) => {
            calc.diagnostics.warn(
                DiagnosticCode::ExitBeforeEntry,
                "Registro de saída anterior à entrada - cálculo parcial",
                Some(date),
            );
            return calc;
        }
        None => {
            calc.diagnostics.warn(
                DiagnosticCode::MissingExit,
                "Registro de saída não encontrado - cálculo parcial",
                Some(date),
            );
            return calc;
        }
    };

    calc.is_complete = true;

    let mut total = (exit - entry).num_minutes();

    if let (Some(start), Some(end)) = (break_start, break_end) {
        let break_minutes = (end - start).num_minutes().max(0);
        total -= break_minutes;
        calc.break_minutes = break_minutes;

        if (break_minutes - config.break_time_minutes).abs() > config.tolerance_minutes {
            calc.diagnostics.warn(
                DiagnosticCode::BreakDurationDeviation,
                format!(
                    "Intervalo de {} difere do previsto ({})",
                    format_minutes(break_minutes),
                    format_minutes(config.break_time_minutes)
                ),
                Some(date),
            );
        }
    }

    let total = total.max(0);
    calc.total_minutes = total;
    calc.regular_minutes = total.min(config.regular_minutes_per_day());
    calc.overtime_minutes = (total - calc.regular_minutes).max(0);
    calc.has_overtime = calc.overtime_minutes > 0;

    if calc.overtime_minutes > config.max_overtime_minutes_per_day() {
        calc.diagnostics.warn(
            DiagnosticCode::DailyOvertimeExceeded,
            format!(
                "Horas extras ({}) acima do limite diário de {}",
                format_minutes(calc.overtime_minutes),
                format_minutes(config.max_overtime_minutes_per_day())
            ),
            Some(date),
        );
    }

    if config.calculate_night_shift {
        calc.night_shift_minutes =
            calculate_night_shift_minutes(entry, exit, &config.night_shift_window);
        calc.has_night_shift = calc.night_shift_minutes > 0;
    }

    let reference = &config.reference_window;

    calc.delay_minutes = (entry - entry.date().and_time(reference.start))
        .num_minutes()
        .max(0);
    calc.is_late = calc.delay_minutes > config.tolerance_minutes;
    if calc.is_late {
        calc.diagnostics.warn(
            DiagnosticCode::Late,
            format!("Atraso de {}", format_minutes(calc.delay_minutes)),
            Some(date),
        );
    }

    calc.early_departure_minutes = (exit.date().and_time(reference.end) - exit)
        .num_minutes()
        .max(0);
    calc.is_early_departure = calc.early_departure_minutes > config.tolerance_minutes;
    if calc.is_early_departure {
        calc.diagnostics.warn(
            DiagnosticCode::EarlyDeparture,
            format!(
                "Saída antecipada de {}",
                format_minutes(calc.early_departure_minutes)
            ),
            Some(date),
        );
    }

    debug!(
        employee_id,
        %date,
        total_minutes = calc.total_minutes,
        overtime_minutes = calc.overtime_minutes,
        night_shift_minutes = calc.night_shift_minutes,
        "Daily hours calculated"
    );

    calc
}

/// Timestamp of the first record of the given type.
fn first_of(records: &[TimeRecord], record_type: RecordType) -> Option<NaiveDateTime> {
    records
        .iter()
        .find(|r| r.record_type == record_type)
        .map(|r| r.timestamp)
}
