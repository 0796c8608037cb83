//! Daily, weekly and monthly work-time summaries.
//!
//! The three levels share the same minute fields ([`MinuteTotals`]) so that
//! the additivity invariant (monthly == Σ weekly == Σ daily) can be checked
//! field by field.

use std::ops::AddAssign;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Diagnostics, TimeRecord};

/// The minute fields summed at every aggregation level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteTotals {
    /// Time between entry and exit, minus the break.
    pub total_minutes: i64,
    /// Minutes up to the regular daily allowance.
    pub regular_minutes: i64,
    /// Minutes beyond the regular daily allowance.
    pub overtime_minutes: i64,
    /// Break minutes deducted.
    pub break_minutes: i64,
    /// Minutes inside the night window.
    pub night_shift_minutes: i64,
    /// Minutes late against the reference start.
    pub delay_minutes: i64,
    /// Minutes early against the reference end.
    pub early_departure_minutes: i64,
}

impl MinuteTotals {
    /// Regular plus overtime minutes.
    pub fn worked_minutes(&self) -> i64 {
        self.regular_minutes + self.overtime_minutes
    }
}

impl AddAssign for MinuteTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.total_minutes += rhs.total_minutes;
        self.regular_minutes += rhs.regular_minutes;
        self.overtime_minutes += rhs.overtime_minutes;
        self.break_minutes += rhs.break_minutes;
        self.night_shift_minutes += rhs.night_shift_minutes;
        self.delay_minutes += rhs.delay_minutes;
        self.early_departure_minutes += rhs.early_departure_minutes;
    }
}

/// Day counters incremented from daily flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounters {
    /// Days with a daily calculation.
    pub work_days: u32,
    /// Days with both an entry and an exit.
    pub complete_days: u32,
    /// Days flagged late.
    pub late_days: u32,
    /// Days flagged as early departure.
    pub early_departure_days: u32,
    /// Days with any overtime.
    pub overtime_days: u32,
    /// Days with any night-shift minutes.
    pub night_shift_days: u32,
}

impl AddAssign for DayCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.work_days += rhs.work_days;
        self.complete_days += rhs.complete_days;
        self.late_days += rhs.late_days;
        self.early_departure_days += rhs.early_departure_days;
        self.overtime_days += rhs.overtime_days;
        self.night_shift_days += rhs.night_shift_days;
    }
}

/// The calculation for one employee on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHoursCalculation {
    /// The calendar day.
    pub date: NaiveDate,
    /// The employee.
    pub employee_id: String,
    /// Time between entry and exit, minus the break.
    pub total_minutes: i64,
    /// Minutes up to the regular daily allowance.
    pub regular_minutes: i64,
    /// Minutes beyond the regular daily allowance.
    pub overtime_minutes: i64,
    /// Break minutes deducted.
    pub break_minutes: i64,
    /// Minutes inside the night window.
    pub night_shift_minutes: i64,
    /// Minutes late against the reference start.
    pub delay_minutes: i64,
    /// Minutes early against the reference end.
    pub early_departure_minutes: i64,
    /// Both an entry and an exit were found.
    pub is_complete: bool,
    /// Delay exceeded the tolerance.
    pub is_late: bool,
    /// Early departure exceeded the tolerance.
    pub is_early_departure: bool,
    /// Any overtime was worked.
    pub has_overtime: bool,
    /// Any night-shift minutes were worked.
    pub has_night_shift: bool,
    /// The source punches, sorted by timestamp.
    pub records: Vec<TimeRecord>,
    /// Warnings and errors for the day.
    pub diagnostics: Diagnostics,
}

impl WorkHoursCalculation {
    /// A zero-value calculation for the given day.
    pub fn empty(date: NaiveDate, employee_id: &str) -> Self {
        Self {
            date,
            employee_id: employee_id.to_string(),
            total_minutes: 0,
            regular_minutes: 0,
            overtime_minutes: 0,
            break_minutes: 0,
            night_shift_minutes: 0,
            delay_minutes: 0,
            early_departure_minutes: 0,
            is_complete: false,
            is_late: false,
            is_early_departure: false,
            has_overtime: false,
            has_night_shift: false,
            records: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// The day's minute fields as [`MinuteTotals`].
    pub fn minute_totals(&self) -> MinuteTotals {
        MinuteTotals {
            total_minutes: self.total_minutes,
            regular_minutes: self.regular_minutes,
            overtime_minutes: self.overtime_minutes,
            break_minutes: self.break_minutes,
            night_shift_minutes: self.night_shift_minutes,
            delay_minutes: self.delay_minutes,
            early_departure_minutes: self.early_departure_minutes,
        }
    }

    /// The day's contribution to the day counters.
    pub fn day_counters(&self) -> DayCounters {
        DayCounters {
            work_days: 1,
            complete_days: u32::from(self.is_complete),
            late_days: u32::from(self.is_late),
            early_departure_days: u32::from(self.is_early_departure),
            overtime_days: u32::from(self.has_overtime),
            night_shift_days: u32::from(self.has_night_shift),
        }
    }

    /// Regular plus overtime minutes.
    pub fn worked_minutes(&self) -> i64 {
        self.regular_minutes + self.overtime_minutes
    }

    /// False when the day carries an error and must not feed payroll unreviewed.
    pub fn is_usable_for_payroll(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Aggregate of the daily calculations of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyWorkHoursCalculation {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// The employee.
    pub employee_id: String,
    /// Σ of the daily minute fields.
    pub totals: MinuteTotals,
    /// Σ of the daily flags.
    pub counters: DayCounters,
    /// Worked hours per worked day.
    pub average_hours_per_day: Decimal,
    /// Weekly overtime above the policy cap.
    pub weekly_overtime_exceeded: bool,
    /// The daily calculations, in input order.
    pub daily_calculations: Vec<WorkHoursCalculation>,
    /// Own diagnostics followed by every daily diagnostic.
    pub diagnostics: Diagnostics,
}

/// Aggregate of the weekly calculations of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyWorkHoursCalculation {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// The employee.
    pub employee_id: String,
    /// Σ of the weekly minute fields.
    pub totals: MinuteTotals,
    /// Σ of the weekly counters.
    pub counters: DayCounters,
    /// Worked hours per worked day.
    pub average_hours_per_day: Decimal,
    /// Complete days over worked days, as a percentage.
    pub attendance_rate: Decimal,
    /// Punctual days over worked days, as a percentage.
    pub punctuality_rate: Decimal,
    /// Monthly overtime above the 44h legal cap.
    pub monthly_overtime_exceeded: bool,
    /// The weekly calculations, in input order.
    pub weekly_calculations: Vec<WeeklyWorkHoursCalculation>,
    /// Own diagnostics followed by every weekly diagnostic.
    pub diagnostics: Diagnostics,
}

impl MonthlyWorkHoursCalculation {
    /// Iterates over every daily calculation of the month, week by week.
    pub fn daily_calculations(&self) -> impl Iterator<Item = &WorkHoursCalculation> {
        self.weekly_calculations
            .iter()
            .flat_map(|week| week.daily_calculations.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_minute_totals_add_assign() {
        let mut totals = MinuteTotals::default();
        totals += MinuteTotals {
            total_minutes: 570,
            regular_minutes: 480,
            overtime_minutes: 90,
            break_minutes: 0,
            night_shift_minutes: 0,
            delay_minutes: 15,
            early_departure_minutes: 0,
        };
        totals += MinuteTotals {
            total_minutes: 480,
            regular_minutes: 480,
            early_departure_minutes: 30,
            ..MinuteTotals::default()
        };

        assert_eq!(totals.total_minutes, 1050);
        assert_eq!(totals.regular_minutes, 960);
        assert_eq!(totals.overtime_minutes, 90);
        assert_eq!(totals.delay_minutes, 15);
        assert_eq!(totals.early_departure_minutes, 30);
        assert_eq!(totals.worked_minutes(), 1050);
    }

    #[test]
    fn test_day_counters_follow_flags() {
        let mut day = WorkHoursCalculation::empty(make_date("2026-03-02"), "emp_001");
        day.is_complete = true;
        day.is_late = true;
        day.has_night_shift = true;

        let counters = day.day_counters();
        assert_eq!(counters.work_days, 1);
        assert_eq!(counters.complete_days, 1);
        assert_eq!(counters.late_days, 1);
        assert_eq!(counters.early_departure_days, 0);
        assert_eq!(counters.overtime_days, 0);
        assert_eq!(counters.night_shift_days, 1);
    }

    #[test]
    fn test_empty_day_is_zero_valued() {
        let day = WorkHoursCalculation::empty(make_date("2026-03-02"), "emp_001");
        assert_eq!(day.minute_totals(), MinuteTotals::default());
        assert!(!day.is_complete);
        assert!(day.is_usable_for_payroll());
    }

    #[test]
    fn test_weekly_serialization_nests_totals() {
        let week = WeeklyWorkHoursCalculation {
            week_start: make_date("2026-03-02"),
            employee_id: "emp_001".to_string(),
            totals: MinuteTotals {
                regular_minutes: 480,
                ..MinuteTotals::default()
            },
            counters: DayCounters::default(),
            average_hours_per_day: Decimal::new(8, 0),
            weekly_overtime_exceeded: false,
            daily_calculations: vec![],
            diagnostics: Diagnostics::default(),
        };

        let json = serde_json::to_string(&week).unwrap();
        assert!(json.contains("\"week_start\":\"2026-03-02\""));
        assert!(json.contains("\"regular_minutes\":480"));
        assert!(json.contains("\"average_hours_per_day\":\"8\""));
    }
}
