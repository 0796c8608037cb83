//! Calculation logic for the Ponto Engine.
//!
//! This module turns clock punches into work-time summaries and derives the
//! financial results from them: the daily calculator with its night-shift
//! evaluator, the weekly and monthly aggregators, the proportional salary and
//! the hour-bank ledger, and the timesheet pipeline that runs them in order
//! for one employee-month.
//!
//! Every function here is synchronous and never fails. Bad clock data is
//! reported through the `diagnostics` of each result.

mod daily;
mod hour_bank;
mod monthly;
mod night_shift;
mod payroll;
mod timesheet;
mod weekly;

pub use daily::calculate_daily_hours;
pub use hour_bank::calculate_hour_bank;
pub use monthly::{MONTHLY_OVERTIME_CAP_MINUTES, aggregate_month};
pub use night_shift::calculate_night_shift_minutes;
pub use payroll::{LOW_ATTENDANCE_THRESHOLD, calculate_proportional_salary};
pub use timesheet::{
    EmployeeMonthReport, MAX_SHIFT_SPAN_HOURS, build_month_report, calculate_month,
    group_by_workday, week_start,
};
pub use weekly::aggregate_week;
