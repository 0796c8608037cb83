//! Parallel month processing for many employees.
//!
//! Employees are independent of each other, so a batch fans out over them
//! with [`rayon`]. Within one employee the pipeline runs day, week, month in
//! order. Cancellation is checked only before an employee starts: once an
//! employee's calculation has begun it runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{EmployeeMonthReport, build_month_report};
use crate::config::PolicyConfig;
use crate::models::TimeRecord;

/// One employee-month to calculate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthJob {
    /// The employee.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// The employee's punches covering the month.
    pub records: Vec<TimeRecord>,
    /// Overrides the policy's base salary for this employee.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
}

/// What happened to one job of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployeeOutcome {
    /// The employee's month was calculated.
    Completed(Box<EmployeeMonthReport>),
    /// The batch was cancelled before this employee started.
    Cancelled {
        /// The employee that was skipped.
        employee_id: String,
    },
}

impl EmployeeOutcome {
    /// The employee this outcome belongs to.
    pub fn employee_id(&self) -> &str {
        match self {
            EmployeeOutcome::Completed(report) => &report.monthly.employee_id,
            EmployeeOutcome::Cancelled { employee_id } => employee_id,
        }
    }

    /// Returns the report if the employee was calculated.
    pub fn report(&self) -> Option<&EmployeeMonthReport> {
        match self {
            EmployeeOutcome::Completed(report) => Some(report.as_ref()),
            EmployeeOutcome::Cancelled { .. } => None,
        }
    }
}

/// Calculates every job in parallel, returning outcomes in input order.
///
/// Setting `cancel` stops new employees from starting. Employees already in
/// progress finish, and every job not started is reported as
/// [`EmployeeOutcome::Cancelled`].
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use ponto_engine::batch::{EmployeeMonthJob, process_batch};
/// use ponto_engine::config::PolicyConfig;
///
/// let job = EmployeeMonthJob {
///     employee_id: "emp_001".to_string(),
///     year: 2026,
///     month: 3,
///     records: vec![],
///     base_salary: None,
/// };
/// let cancel = AtomicBool::new(false);
///
/// let outcomes = process_batch(vec![job], &PolicyConfig::default(), &cancel);
/// assert_eq!(outcomes.len(), 1);
/// assert!(outcomes[0].report().is_some());
/// ```
pub fn process_batch(
    jobs: Vec<EmployeeMonthJob>,
    policy: &PolicyConfig,
    cancel: &AtomicBool,
) -> Vec<EmployeeOutcome> {
    let batch_id = Uuid::new_v4();
    let job_count = jobs.len();
    let start_time = Instant::now();
    info!(batch_id = %batch_id, jobs = job_count, "Processing batch");

    let outcomes: Vec<EmployeeOutcome> = jobs
        .into_par_iter()
        .map(|job| {
            if cancel.load(Ordering::Relaxed) {
                debug!(batch_id = %batch_id, employee_id = %job.employee_id, "Skipped after cancellation");
                return EmployeeOutcome::Cancelled {
                    employee_id: job.employee_id,
                };
            }

            let report = build_month_report(
                &job.employee_id,
                job.year,
                job.month,
                &job.records,
                policy,
                job.base_salary,
            );
            EmployeeOutcome::Completed(Box::new(report))
        })
        .collect();

    let completed = outcomes.iter().filter(|o| o.report().is_some()).count();
    info!(
        batch_id = %batch_id,
        jobs = job_count,
        completed,
        cancelled = job_count - completed,
        duration_us = start_time.elapsed().as_micros(),
        "Batch finished"
    );

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HourBankConfig, SalaryConfig, WorkHoursConfig};
    use crate::models::RecordType;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn punch(employee_id: &str, record_type: RecordType, datetime: &str) -> TimeRecord {
        TimeRecord {
            id: format!("{}-{}", employee_id, datetime),
            record_type,
            timestamp: NaiveDateTime::parse_from_str(datetime, "%Y-%m-%d %H:%M").unwrap(),
            employee_id: employee_id.to_string(),
        }
    }

    fn job(employee_id: &str) -> EmployeeMonthJob {
        EmployeeMonthJob {
            employee_id: employee_id.to_string(),
            year: 2026,
            month: 3,
            records: vec![
                punch(employee_id, RecordType::Entry, "2026-03-02 08:00"),
                punch(employee_id, RecordType::Exit, "2026-03-02 17:00"),
            ],
            base_salary: None,
        }
    }

    fn policy() -> PolicyConfig {
        PolicyConfig::new(
            WorkHoursConfig::default(),
            SalaryConfig::default().with_base_salary(dec("2000")),
            HourBankConfig::default(),
        )
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let jobs: Vec<EmployeeMonthJob> = (0..50).map(|i| job(&format!("emp_{:03}", i))).collect();
        let cancel = AtomicBool::new(false);

        let outcomes = process_batch(jobs, &policy(), &cancel);

        assert_eq!(outcomes.len(), 50);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.employee_id(), format!("emp_{:03}", i));
            let report = outcome.report().unwrap();
            assert_eq!(report.monthly.totals.total_minutes, 540);
        }
    }

    #[test]
    fn test_batch_matches_single_employee_pipeline() {
        let single = job("emp_001");
        let expected = build_month_report(
            &single.employee_id,
            single.year,
            single.month,
            &single.records,
            &policy(),
            None,
        );
        let cancel = AtomicBool::new(false);

        let outcomes = process_batch(vec![single], &policy(), &cancel);

        assert_eq!(outcomes[0].report(), Some(&expected));
    }

    #[test]
    fn test_cancelled_batch_skips_every_employee() {
        let jobs = vec![job("emp_001"), job("emp_002")];
        let cancel = AtomicBool::new(true);

        let outcomes = process_batch(jobs, &policy(), &cancel);

        assert_eq!(
            outcomes,
            vec![
                EmployeeOutcome::Cancelled {
                    employee_id: "emp_001".to_string()
                },
                EmployeeOutcome::Cancelled {
                    employee_id: "emp_002".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_salary_override_per_job() {
        let mut custom = job("emp_001");
        custom.base_salary = Some(dec("4400"));
        let cancel = AtomicBool::new(false);

        let outcomes = process_batch(vec![custom, job("emp_002")], &policy(), &cancel);

        assert_eq!(outcomes[0].report().unwrap().salary.base_salary, dec("4400"));
        assert_eq!(outcomes[1].report().unwrap().salary.base_salary, dec("2000"));
    }
}
