//! Policy loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading a company
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{HourBankConfig, PolicyConfig, SalaryConfig, WorkHoursConfig};

/// Loads and provides access to a validated policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── work_hours.yaml  # Daily/weekly limits, night window, tolerance
/// ├── salary.yaml      # Salary, rates and discount multipliers
/// └── hour_bank.yaml   # Absence debit and credit limit
/// ```
///
/// # Example
///
/// ```no_run
/// use ponto_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/default")?;
/// println!("Regular hours/day: {}", loader.work_hours().regular_hours_per_day);
/// # Ok::<(), ponto_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: PolicyConfig,
}

impl PolicyLoader {
    /// Loads and validates the policy in the specified directory.
    ///
    /// Returns an error if any of the three files is missing, is not valid
    /// YAML for its type, or holds a value rejected by validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let work_hours = Self::load_yaml::<WorkHoursConfig>(&path.join("work_hours.yaml"))?;
        let salary = Self::load_yaml::<SalaryConfig>(&path.join("salary.yaml"))?;
        let hour_bank = Self::load_yaml::<HourBankConfig>(&path.join("hour_bank.yaml"))?;

        let loader = Self::from_parts(work_hours, salary, hour_bank)?;
        debug!(path = %path.display(), "Policy loaded");
        Ok(loader)
    }

    /// Builds a loader from in-memory parts, validating them.
    pub fn from_parts(
        work_hours: WorkHoursConfig,
        salary: SalaryConfig,
        hour_bank: HourBankConfig,
    ) -> EngineResult<Self> {
        let policy = PolicyConfig::new(work_hours, salary, hour_bank);
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> PolicyConfig {
        self.policy
    }

    /// Returns the work-hour policy.
    pub fn work_hours(&self) -> &WorkHoursConfig {
        self.policy.work_hours()
    }

    /// Returns the salary policy.
    pub fn salary(&self) -> &SalaryConfig {
        self.policy.salary()
    }

    /// Returns the hour bank policy.
    pub fn hour_bank(&self) -> &HourBankConfig {
        self.policy.hour_bank()
    }
}
