//! Monthly aggregation of weekly calculations.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::format::format_minutes;
use crate::models::{
    DayCounters, DiagnosticCode, Diagnostics, MinuteTotals, MonthlyWorkHoursCalculation,
    WeeklyWorkHoursCalculation,
};

use super::weekly::average_hours_per_day;

/// Monthly overtime cap in minutes (44 hours).
pub const MONTHLY_OVERTIME_CAP_MINUTES: i64 = 44 * 60;

/// Aggregates the weekly calculations of one month.
///
/// Sums the weekly totals and counters, so the monthly fields equal the sum
/// over every daily calculation in the month. Adds the attendance rate
/// (complete days over worked days) and punctuality rate (days not late over
/// worked days), both as percentages. Overtime above
/// [`MONTHLY_OVERTIME_CAP_MINUTES`] sets `monthly_overtime_exceeded` and adds
/// a warning.
///
/// # Example
///
/// ```
/// use ponto_engine::calculation::aggregate_month;
///
/// let month = aggregate_month("emp_001", 2026, 3, vec![]);
/// assert_eq!(month.counters.work_days, 0);
/// assert!(!month.diagnostics.warnings.is_empty());
/// ```
pub fn aggregate_month(
    employee_id: &str,
    year: i32,
    month: u32,
    weeklies: Vec<WeeklyWorkHoursCalculation>,
) -> MonthlyWorkHoursCalculation {
    let mut totals = MinuteTotals::default();
    let mut counters = DayCounters::default();
    let mut diagnostics = Diagnostics::default();

    if weeklies.is_empty() {
        diagnostics.warn(
            DiagnosticCode::NoCalculations,
            "Nenhum cálculo fornecido",
            None,
        );
    }

    for week in &weeklies {
        totals += week.totals;
        counters += week.counters;
    }

    let monthly_overtime_exceeded = totals.overtime_minutes > MONTHLY_OVERTIME_CAP_MINUTES;
    if monthly_overtime_exceeded {
        diagnostics.warn(
            DiagnosticCode::MonthlyOvertimeExceeded,
            format!(
                "Horas extras mensais ({}) acima do limite legal de {}",
                format_minutes(totals.overtime_minutes),
                format_minutes(MONTHLY_OVERTIME_CAP_MINUTES)
            ),
            None,
        );
    }

    for week in &weeklies {
        diagnostics.absorb(&week.diagnostics);
    }

    let attendance_rate = percentage(counters.complete_days, counters.work_days);
    let punctuality_rate = percentage(
        counters.work_days.saturating_sub(counters.late_days),
        counters.work_days,
    );

    debug!(
        employee_id,
        year,
        month,
        work_days = counters.work_days,
        regular_minutes = totals.regular_minutes,
        overtime_minutes = totals.overtime_minutes,
        "Month aggregated"
    );

    MonthlyWorkHoursCalculation {
        year,
        month,
        employee_id: employee_id.to_string(),
        totals,
        counters,
        average_hours_per_day: average_hours_per_day(&totals, counters.work_days),
        attendance_rate,
        punctuality_rate,
        monthly_overtime_exceeded,
        weekly_calculations: weeklies,
        diagnostics,
    }
}

/// `part / whole × 100` to two decimals, zero when `whole` is zero.
fn percentage(part: u32, whole: u32) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
