//! Proportional salary calculation.
//!
//! Derives a month's pay from the monthly work-hour summary: the base salary
//! prorated by worked minutes, the overtime and night-shift premiums, and the
//! discounts for absences, late arrivals and early departures.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::config::{SalaryConfig, hours_to_minutes};
use crate::format::format_percentage;
use crate::models::{
    DiagnosticCode, Diagnostics, MonthlyWorkHoursCalculation, ProportionalSalaryCalculation,
};

/// Attendance rate (percent) under which a warning is emitted.
pub const LOW_ATTENDANCE_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Calculates the proportional salary for a month.
///
/// Rates are computed unrounded and every monetary output is rounded to
/// cents at the end. `final_salary` is computed from the rounded components,
/// so `final_salary == proportional_salary + overtime_value +
/// night_shift_value - total_discounts` holds exactly on the result.
///
/// Absences are `work_days_per_month - work_days` and may be negative when
/// the employee worked more days than scheduled. The final salary is never
/// floored at zero.
///
/// A policy that fails [`SalaryConfig::validate`] is replaced by the default
/// policy, whose base salary is zero, and an `InvalidSalaryPolicy` error is
/// recorded. Every monetary output is then zero.
///
/// # Example
///
/// ```
/// use ponto_engine::calculation::{aggregate_month, calculate_proportional_salary};
/// use ponto_engine::config::SalaryConfig;
/// use rust_decimal::Decimal;
///
/// let month = aggregate_month("emp_001", 2026, 3, vec![]);
/// let config = SalaryConfig::default().with_base_salary(Decimal::new(2000, 0));
///
/// let salary = calculate_proportional_salary(&month, &config);
/// assert_eq!(salary.proportional_salary, Decimal::ZERO);
/// assert_eq!(salary.absences, 22);
/// ```
pub fn calculate_proportional_salary(
    monthly: &MonthlyWorkHoursCalculation,
    config: &SalaryConfig,
) -> ProportionalSalaryCalculation {
    let mut diagnostics = Diagnostics::default();
    let fallback;
    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            warn!(employee_id = %monthly.employee_id, error = %err, "Salary policy rejected");
            diagnostics.error(
                DiagnosticCode::InvalidSalaryPolicy,
                format!("Política salarial inválida: {}", err),
                None,
            );
            fallback = SalaryConfig::default();
            &fallback
        }
    };

    let sixty = Decimal::from(60);
    let base = config.base_salary;
    let days_per_month = Decimal::from(config.work_days_per_month);

    let expected_hours = days_per_month * config.work_hours_per_day;
    let total_expected_minutes = hours_to_minutes(expected_hours);
    let total_worked_minutes = monthly.totals.worked_minutes();

    let attendance_ratio = Decimal::from(total_worked_minutes)
        .checked_div(expected_hours * sixty)
        .unwrap_or(Decimal::ZERO);
    let proportional_salary = base * attendance_ratio;

    let absences = i64::from(config.work_days_per_month) - i64::from(monthly.counters.work_days);
    let late_days = monthly.counters.late_days;
    let early_departures = monthly.counters.early_departure_days;

    let hourly_rate = base.checked_div(expected_hours).unwrap_or(Decimal::ZERO);
    let daily_rate = base.checked_div(days_per_month).unwrap_or(Decimal::ZERO);

    let overtime_hours = Decimal::from(monthly.totals.overtime_minutes) / sixty;
    let night_shift_hours = Decimal::from(monthly.totals.night_shift_minutes) / sixty;
    let overtime_value = overtime_hours * hourly_rate * (config.overtime_rate - Decimal::ONE);
    let night_shift_value =
        night_shift_hours * hourly_rate * (config.night_shift_rate - Decimal::ONE);

    let absences_discount = cents(Decimal::from(absences) * daily_rate * config.discount_per_absence);
    let late_discount = cents(Decimal::from(late_days) * daily_rate * config.discount_per_late);
    let early_departure_discount = cents(
        Decimal::from(early_departures) * daily_rate * config.discount_per_early_departure,
    );
    let total_discounts = absences_discount + late_discount + early_departure_discount;

    let proportional_salary = cents(proportional_salary);
    let overtime_value = cents(overtime_value);
    let night_shift_value = cents(night_shift_value);
    let final_salary = proportional_salary + overtime_value + night_shift_value - total_discounts;
    let attendance_rate = two_places(attendance_ratio * Decimal::ONE_HUNDRED);

    if absences > 0 {
        diagnostics.warn(
            DiagnosticCode::Absences,
            format!("{} falta(s) no mês", absences),
            None,
        );
    }
    if late_days > 0 {
        diagnostics.warn(
            DiagnosticCode::LateArrivals,
            format!("{} atraso(s) no mês", late_days),
            None,
        );
    }
    if early_departures > 0 {
        diagnostics.warn(
            DiagnosticCode::EarlyDepartures,
            format!("{} saída(s) antecipada(s) no mês", early_departures),
            None,
        );
    }
    if attendance_rate < LOW_ATTENDANCE_THRESHOLD {
        diagnostics.warn(
            DiagnosticCode::LowAttendance,
            format!(
                "Taxa de presença baixa: {}",
                format_percentage(attendance_rate)
            ),
            None,
        );
    }
    diagnostics.absorb(&monthly.diagnostics);

    debug!(
        employee_id = %monthly.employee_id,
        year = monthly.year,
        month = monthly.month,
        %final_salary,
        %total_discounts,
        "Proportional salary calculated"
    );

    ProportionalSalaryCalculation {
        employee_id: monthly.employee_id.clone(),
        year: monthly.year,
        month: monthly.month,
        base_salary: base,
        total_worked_minutes,
        total_expected_minutes,
        attendance_rate,
        proportional_salary,
        absences,
        late_days,
        early_departures,
        hourly_rate: cents(hourly_rate),
        daily_rate: cents(daily_rate),
        overtime_hours: two_places(overtime_hours),
        overtime_value,
        night_shift_hours: two_places(night_shift_hours),
        night_shift_value,
        absences_discount,
        late_discount,
        early_departure_discount,
        total_discounts,
        final_salary,
        diagnostics,
    }
}

fn cents(amount: Decimal) -> Decimal {
    two_places(amount)
}

fn two_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
