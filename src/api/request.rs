//! Request types for the Ponto Engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoints and the checks applied to them before calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::batch::EmployeeMonthJob;
use crate::config::MAX_BASE_SALARY;
use crate::error::{EngineError, EngineResult};
use crate::models::TimeRecord;

/// Request body for the `/calculate/monthly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCalculationRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// The employee's punches covering the month.
    pub records: Vec<TimeRecord>,
    /// Optional override for the policy's base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
}

impl From<MonthlyCalculationRequest> for EmployeeMonthJob {
    fn from(req: MonthlyCalculationRequest) -> Self {
        EmployeeMonthJob {
            employee_id: req.employee_id,
            year: req.year,
            month: req.month,
            records: req.records,
            base_salary: req.base_salary,
        }
    }
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationRequest {
    /// The employee-months to calculate.
    pub jobs: Vec<EmployeeMonthJob>,
}

/// Rejects a job the engine would silently misread.
///
/// Checks that the employee id is present, the month exists, the salary
/// override is between zero and [`MAX_BASE_SALARY`], and every record
/// belongs to the employee.
pub fn validate_job(job: &EmployeeMonthJob) -> EngineResult<()> {
    if job.employee_id.trim().is_empty() {
        return Err(invalid("employee_id must not be empty"));
    }

    if !(1..=12).contains(&job.month) {
        return Err(invalid(format!(
            "month must be between 1 and 12, got {}",
            job.month
        )));
    }

    if let Some(salary) = job.base_salary {
        if salary < Decimal::ZERO {
            return Err(invalid(format!(
                "base_salary must not be negative, got {}",
                salary
            )));
        }
        if salary > MAX_BASE_SALARY {
            return Err(invalid(format!(
                "base_salary must not exceed {}, got {}",
                MAX_BASE_SALARY, salary
            )));
        }
    }

    if let Some(record) = job.records.iter().find(|r| r.employee_id != job.employee_id) {
        return Err(invalid(format!(
            "record '{}' belongs to employee '{}', not '{}'",
            record.id, record.employee_id, job.employee_id
        )));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidRequest {
        message: message.into(),
    }
}
