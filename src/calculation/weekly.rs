//! Weekly aggregation of daily calculations.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::WorkHoursConfig;
use crate::format::format_minutes;
use crate::models::{
    DayCounters, DiagnosticCode, Diagnostics, MinuteTotals, WeeklyWorkHoursCalculation,
    WorkHoursCalculation,
};

/// Aggregates the daily calculations of one week.
///
/// Every minute field is summed exactly and each daily flag increments its
/// counter. Weekly overtime above `max_overtime_per_week` sets
/// `weekly_overtime_exceeded` and adds a warning, and so does working more
/// days than `work_days_per_week`. An empty week yields a zero-valued result
/// with a warning.
///
/// The result's diagnostics hold the week's own warnings followed by every
/// daily diagnostic, in input order.
///
/// # Arguments
///
/// * `employee_id` - The employee the days belong to
/// * `week_start` - Monday of the week
/// * `dailies` - The daily calculations, in chronological order
/// * `config` - The work-hour policy
pub fn aggregate_week(
    employee_id: &str,
    week_start: NaiveDate,
    dailies: Vec<WorkHoursCalculation>,
    config: &WorkHoursConfig,
) -> WeeklyWorkHoursCalculation {
    let mut totals = MinuteTotals::default();
    let mut counters = DayCounters::default();
    let mut diagnostics = Diagnostics::default();

    if dailies.is_empty() {
        diagnostics.warn(
            DiagnosticCode::NoCalculations,
            "Nenhum cálculo fornecido",
            Some(week_start),
        );
    }

    for day in &dailies {
        totals += day.minute_totals();
        counters += day.day_counters();
    }

    if counters.work_days > config.work_days_per_week {
        diagnostics.warn(
            DiagnosticCode::ExtraWorkDays,
            format!(
                "{} dias trabalhados na semana, acima dos {} previstos",
                counters.work_days, config.work_days_per_week
            ),
            Some(week_start),
        );
    }

    let cap = config.max_overtime_minutes_per_week();
    let weekly_overtime_exceeded = totals.overtime_minutes > cap;
    if weekly_overtime_exceeded {
        diagnostics.warn(
            DiagnosticCode::WeeklyOvertimeExceeded,
            format!(
                "Horas extras semanais ({}) acima do limite de {}",
                format_minutes(totals.overtime_minutes),
                format_minutes(cap)
            ),
            Some(week_start),
        );
    }

    for day in &dailies {
        diagnostics.absorb(&day.diagnostics);
    }

    debug!(
        employee_id,
        %week_start,
        work_days = counters.work_days,
        overtime_minutes = totals.overtime_minutes,
        "Week aggregated"
    );

    WeeklyWorkHoursCalculation {
        week_start,
        employee_id: employee_id.to_string(),
        totals,
        counters,
        average_hours_per_day: average_hours_per_day(&totals, counters.work_days),
        weekly_overtime_exceeded,
        daily_calculations: dailies,
        diagnostics,
    }
}

/// Worked hours (regular + overtime) per worked day, to two decimals.
///
/// Zero when no day was worked.
pub(super) fn average_hours_per_day(totals: &MinuteTotals, work_days: u32) -> Decimal {
    if work_days == 0 {
        return Decimal::ZERO;
    }

    let minutes = Decimal::from(totals.worked_minutes());
    let divisor = Decimal::from(work_days) * Decimal::from(60);
    (minutes / divisor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn day(date_str: &str, regular: i64, overtime: i64) -> WorkHoursCalculation {
        let mut calc = WorkHoursCalculation::empty(make_date(date_str), "emp_001");
        calc.total_minutes = regular + overtime;
        calc.regular_minutes = regular;
        calc.overtime_minutes = overtime;
        calc.has_overtime = overtime > 0;
        calc.is_complete = true;
        calc
    }

    #[test]
    fn test_week_sums_minutes_and_counters() {
        let mut late = day("2026-03-03", 480, 0);
        late.delay_minutes = 25;
        late.is_late = true;
        late.diagnostics
            .warn(DiagnosticCode::Late, "Atraso de 25min", Some(late.date));

        let dailies = vec![day("2026-03-02", 480, 90), late, day("2026-03-04", 420, 0)];

        let week = aggregate_week(
            "emp_001",
            make_date("2026-03-02"),
            dailies,
            &WorkHoursConfig::default(),
        );

        assert_eq!(week.totals.regular_minutes, 1380);
        assert_eq!(week.totals.overtime_minutes, 90);
        assert_eq!(week.totals.delay_minutes, 25);
        assert_eq!(week.counters.work_days, 3);
        assert_eq!(week.counters.complete_days, 3);
        assert_eq!(week.counters.late_days, 1);
        assert_eq!(week.counters.overtime_days, 1);
        // (1380 + 90) / (3 * 60)
        assert_eq!(week.average_hours_per_day, dec("8.17"));
        assert!(!week.weekly_overtime_exceeded);
        assert_eq!(week.daily_calculations.len(), 3);
        assert!(week.diagnostics.has_warning(DiagnosticCode::Late));
    }

    #[test]
    fn test_empty_week_warns() {
        let week = aggregate_week(
            "emp_001",
            make_date("2026-03-02"),
            vec![],
            &WorkHoursConfig::default(),
        );

        assert!(week.diagnostics.has_warning(DiagnosticCode::NoCalculations));
        assert!(week.diagnostics.errors.is_empty());
        assert_eq!(week.totals, MinuteTotals::default());
        assert_eq!(week.average_hours_per_day, Decimal::ZERO);
    }

    #[test]
    fn test_weekly_overtime_cap() {
        // 5 days with 2h30 overtime each = 12h30 > 10h
        let dailies = (2..=6)
            .map(|d| day(&format!("2026-03-{:02}", d), 480, 150))
            .collect();

        let week = aggregate_week(
            "emp_001",
            make_date("2026-03-02"),
            dailies,
            &WorkHoursConfig::default(),
        );

        assert_eq!(week.totals.overtime_minutes, 750);
        assert!(week.weekly_overtime_exceeded);
        assert!(week.diagnostics.has_warning(DiagnosticCode::WeeklyOvertimeExceeded));
    }

    #[test]
    fn test_extra_work_days_warns() {
        let dailies = (2..=7)
            .map(|d| day(&format!("2026-03-{:02}", d), 480, 0))
            .collect();

        let week = aggregate_week(
            "emp_001",
            make_date("2026-03-02"),
            dailies,
            &WorkHoursConfig::default(),
        );

        assert_eq!(week.counters.work_days, 6);
        assert!(week.diagnostics.has_warning(DiagnosticCode::ExtraWorkDays));
    }

    #[test]
    fn test_own_diagnostics_precede_daily_ones() {
        let mut first = day("2026-03-02", 480, 150);
        first.diagnostics.warn(DiagnosticCode::DailyOvertimeExceeded, "x", Some(first.date));
        let dailies = vec![first];
        let config = WorkHoursConfig {
            max_overtime_per_week: dec("2"),
            ..WorkHoursConfig::default()
        };

        let week = aggregate_week("emp_001", make_date("2026-03-02"), dailies, &config);

        assert_eq!(
            week.diagnostics.warnings[0].code,
            DiagnosticCode::WeeklyOvertimeExceeded
        );
        assert_eq!(
            week.diagnostics.warnings[1].code,
            DiagnosticCode::DailyOvertimeExceeded
        );
    }
}
