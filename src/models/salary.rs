//! Proportional salary result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Diagnostics;

/// The salary derived from one month of work.
///
/// Overtime and night-shift values hold only the premium portion: the base
/// portion of those hours is already inside `proportional_salary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionalSalaryCalculation {
    /// The employee.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Contracted monthly salary.
    pub base_salary: Decimal,
    /// Regular plus overtime minutes worked.
    pub total_worked_minutes: i64,
    /// Minutes the policy expects in a month.
    pub total_expected_minutes: i64,
    /// Worked minutes over expected minutes, as a percentage.
    pub attendance_rate: Decimal,
    /// Base salary scaled by worked over expected minutes.
    pub proportional_salary: Decimal,
    /// Expected work days minus days worked. May be negative.
    pub absences: i64,
    /// Days flagged late.
    pub late_days: u32,
    /// Days flagged as early departure.
    pub early_departures: u32,
    /// Base salary per expected hour.
    pub hourly_rate: Decimal,
    /// Base salary per expected day.
    pub daily_rate: Decimal,
    /// Overtime worked, in hours.
    pub overtime_hours: Decimal,
    /// Overtime premium.
    pub overtime_value: Decimal,
    /// Night-shift work, in hours.
    pub night_shift_hours: Decimal,
    /// Night-shift premium.
    pub night_shift_value: Decimal,
    /// Discount for absences.
    pub absences_discount: Decimal,
    /// Discount for late arrivals.
    pub late_discount: Decimal,
    /// Discount for early departures.
    pub early_departure_discount: Decimal,
    /// Sum of the three discounts.
    pub total_discounts: Decimal,
    /// Proportional salary plus premiums minus discounts. Never floored.
    pub final_salary: Decimal,
    /// Own warnings followed by the monthly diagnostics.
    pub diagnostics: Diagnostics,
}
