//! The per-employee month pipeline.
//!
//! Runs the calculation levels in order for one employee and one month:
//! punches are grouped into work days, each day is calculated, days are
//! grouped into ISO weeks (Monday start), weeks are aggregated into the month,
//! and the payroll and hour-bank results are derived from the month.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{PolicyConfig, WorkHoursConfig};
use crate::models::{
    MonthlyWorkHoursCalculation, ProportionalSalaryCalculation, RecordType, TimeRecord,
    WorkHoursCalculation, WorkTimeBankCalculation,
};

use super::{
    aggregate_month, aggregate_week, calculate_daily_hours, calculate_hour_bank,
    calculate_proportional_salary,
};

/// Longest span between an ENTRY and a later punch that still belongs to the
/// same shift.
pub const MAX_SHIFT_SPAN_HOURS: i64 = 24;

/// Every result produced for one employee and one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthReport {
    /// Daily, weekly and monthly work hours.
    pub monthly: MonthlyWorkHoursCalculation,
    /// The proportional salary derived from `monthly`.
    pub salary: ProportionalSalaryCalculation,
    /// The hour-bank ledger derived from `monthly`.
    pub hour_bank: WorkTimeBankCalculation,
}

/// Groups punches into work days.
///
/// A work day is keyed by the date of its ENTRY. Punches that follow an
/// ENTRY without an EXIT yet, within [`MAX_SHIFT_SPAN_HOURS`], belong to that
/// ENTRY's day even after midnight, so an overnight shift stays in one group.
/// Any other punch is keyed by its own calendar date.
///
/// Records inside each group are in timestamp order.
pub fn group_by_workday<'a, I>(records: I) -> BTreeMap<NaiveDate, Vec<TimeRecord>>
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    let mut sorted: Vec<&TimeRecord> = records.into_iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let max_span = Duration::hours(MAX_SHIFT_SPAN_HOURS);
    let mut days: BTreeMap<NaiveDate, Vec<TimeRecord>> = BTreeMap::new();
    let mut open_shift: Option<NaiveDateTime> = None;

    for record in sorted {
        let key = if record.record_type == RecordType::Entry {
            match open_shift {
                Some(start) if start.date() == record.date() => {}
                _ => open_shift = Some(record.timestamp),
            }
            record.date()
        } else {
            let key = match open_shift {
                Some(start) if record.timestamp - start < max_span => start.date(),
                _ => {
                    open_shift = None;
                    record.date()
                }
            };
            if record.record_type == RecordType::Exit {
                open_shift = None;
            }
            key
        };

        days.entry(key).or_default().push(record.clone());
    }

    days
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Calculates the work hours of one employee for one month.
///
/// `records` may contain punches of other employees and other months; only
/// the employee's work days starting inside the month are calculated. A day
/// without punches produces no daily calculation, so it counts as an absence
/// in payroll rather than as an incomplete day.
///
/// # Arguments
///
/// * `employee_id` - The employee to calculate
/// * `year` - Calendar year
/// * `month` - Calendar month (1-12)
/// * `records` - Clock punches covering at least the month
/// * `config` - The work-hour policy
pub fn calculate_month(
    employee_id: &str,
    year: i32,
    month: u32,
    records: &[TimeRecord],
    config: &WorkHoursConfig,
) -> MonthlyWorkHoursCalculation {
    let days = group_by_workday(records.iter().filter(|r| r.employee_id == employee_id));

    let mut weeks: BTreeMap<NaiveDate, Vec<WorkHoursCalculation>> = BTreeMap::new();
    for (date, day_records) in days {
        if date.year() != year || date.month() != month {
            continue;
        }
        let daily = calculate_daily_hours(date, employee_id, &day_records, config);
        weeks.entry(week_start(date)).or_default().push(daily);
    }

    debug!(employee_id, year, month, weeks = weeks.len(), "Work days grouped");

    let weeklies = weeks
        .into_iter()
        .map(|(start, dailies)| aggregate_week(employee_id, start, dailies, config))
        .collect();

    aggregate_month(employee_id, year, month, weeklies)
}

/// Runs the full pipeline for one employee and one month.
///
/// `base_salary` overrides the policy's base salary for this employee.
pub fn build_month_report(
    employee_id: &str,
    year: i32,
    month: u32,
    records: &[TimeRecord],
    policy: &PolicyConfig,
    base_salary: Option<Decimal>,
) -> EmployeeMonthReport {
    let monthly = calculate_month(employee_id, year, month, records, policy.work_hours());

    let salary = match base_salary {
        Some(amount) => {
            calculate_proportional_salary(&monthly, &policy.salary().with_base_salary(amount))
        }
        None => calculate_proportional_salary(&monthly, policy.salary()),
    };
    let hour_bank = calculate_hour_bank(&monthly, policy.hour_bank());

    EmployeeMonthReport {
        monthly,
        salary,
        hour_bank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HourBankConfig, SalaryConfig};
    use crate::models::DiagnosticCode;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn punch(employee_id: &str, record_type: RecordType, datetime: &str) -> TimeRecord {
        TimeRecord {
            id: format!("{}-{}", employee_id, datetime),
            record_type,
            timestamp: NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M").unwrap(),
            employee_id: employee_id.to_string(),
        }
    }

    fn shift(employee_id: &str, date_str: &str, entry: &str, exit: &str) -> Vec<TimeRecord> {
        vec![
            punch(employee_id, RecordType::Entry, &format!("{} {}", date_str, entry)),
            punch(employee_id, RecordType::Exit, &format!("{} {}", date_str, exit)),
        ]
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2026-03-04 is a Wednesday
        assert_eq!(week_start(make_date("2026-03-04")), make_date("2026-03-02"));
        assert_eq!(week_start(make_date("2026-03-02")), make_date("2026-03-02"));
        assert_eq!(week_start(make_date("2026-03-01")), make_date("2026-02-23"));
    }

    #[test]
    fn test_overnight_shift_stays_in_one_workday() {
        let records = vec![
            punch("emp_001", RecordType::Entry, "2026-03-02 22:00"),
            punch("emp_001", RecordType::Exit, "2026-03-03 06:00"),
            punch("emp_001", RecordType::Entry, "2026-03-03 22:00"),
        ];

        let days = group_by_workday(&records);

        assert_eq!(days.len(), 2);
        assert_eq!(days[&make_date("2026-03-02")].len(), 2);
        assert_eq!(days[&make_date("2026-03-03")].len(), 1);
    }

    #[test]
    fn test_forgotten_exit_does_not_swallow_next_day() {
        let records = vec![
            punch("emp_001", RecordType::Entry, "2026-03-02 08:00"),
            punch("emp_001", RecordType::Entry, "2026-03-03 08:00"),
            punch("emp_001", RecordType::Exit, "2026-03-03 17:00"),
        ];

        let days = group_by_workday(&records);

        assert_eq!(days[&make_date("2026-03-02")].len(), 1);
        assert_eq!(days[&make_date("2026-03-03")].len(), 2);
    }

    #[test]
    fn test_calculate_month_filters_employee_and_month() {
        let mut records = Vec::new();
        records.extend(shift("emp_001", "2026-03-02", "08:00", "17:00"));
        records.extend(shift("emp_001", "2026-03-03", "08:00", "17:00"));
        records.extend(shift("emp_001", "2026-04-01", "08:00", "17:00"));
        records.extend(shift("emp_002", "2026-03-02", "08:00", "17:00"));

        let month = calculate_month("emp_001", 2026, 3, &records, &WorkHoursConfig::default());

        assert_eq!(month.counters.work_days, 2);
        assert_eq!(month.totals.total_minutes, 1080);
        assert_eq!(month.weekly_calculations.len(), 1);
        assert!(month.daily_calculations().all(|d| d.employee_id == "emp_001"));
    }

    #[test]
    fn test_calculate_month_splits_weeks() {
        let mut records = Vec::new();
        // Friday and the following Monday
        records.extend(shift("emp_001", "2026-03-06", "08:00", "17:00"));
        records.extend(shift("emp_001", "2026-03-09", "08:00", "17:00"));

        let month = calculate_month("emp_001", 2026, 3, &records, &WorkHoursConfig::default());

        assert_eq!(month.weekly_calculations.len(), 2);
        assert_eq!(month.weekly_calculations[0].week_start, make_date("2026-03-02"));
        assert_eq!(month.weekly_calculations[1].week_start, make_date("2026-03-09"));
    }

    #[test]
    fn test_month_without_records() {
        let month = calculate_month("emp_001", 2026, 3, &[], &WorkHoursConfig::default());

        assert!(month.weekly_calculations.is_empty());
        assert!(month.diagnostics.has_warning(DiagnosticCode::NoCalculations));
    }

    #[test]
    fn test_build_month_report_uses_salary_override() {
        let records = shift("emp_001", "2026-03-02", "08:00", "17:00");
        let policy = PolicyConfig::new(
            WorkHoursConfig::default(),
            SalaryConfig::default(),
            HourBankConfig::default(),
        );

        let report = build_month_report("emp_001", 2026, 3, &records, &policy, Some(dec("2200")));

        assert_eq!(report.salary.base_salary, dec("2200"));
        assert_eq!(report.salary.daily_rate, dec("100.00"));
        assert_eq!(report.monthly.counters.work_days, 1);
        assert_eq!(report.hour_bank.balance, 0);
    }

    #[test]
    fn test_build_month_report_is_deterministic() {
        let mut records = Vec::new();
        records.extend(shift("emp_001", "2026-03-02", "08:30", "18:00"));
        records.extend(shift("emp_001", "2026-03-03", "07:55", "16:00"));
        let policy = PolicyConfig::new(
            WorkHoursConfig::default(),
            SalaryConfig::default().with_base_salary(dec("3000")),
            HourBankConfig::default(),
        );

        let first = build_month_report("emp_001", 2026, 3, &records, &policy, None);
        let second = build_month_report("emp_001", 2026, 3, &records, &policy, None);

        assert_eq!(first, second);
    }
}
