//! Policy configuration types.
//!
//! These are the strongly-typed policy values passed into every calculation.
//! They are deserialized from YAML policy files and are never mutated by the
//! engine. The `Default` impls reproduce the legacy company-wide defaults.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Serde adapter for `HH:MM` wall-clock times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Builds a wall-clock time from literal hour and minute values.
fn wall_clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid wall-clock time")
}

/// Largest base salary accepted from a policy or a request override.
///
/// Keeps every payroll product well inside `Decimal` range.
pub const MAX_BASE_SALARY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest multiplier accepted for a salary rate or discount.
const MAX_RATE_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Converts a policy hour value to whole minutes.
pub(crate) fn hours_to_minutes(hours: Decimal) -> i64 {
    (hours * Decimal::from(60)).trunc().to_i64().unwrap_or(0)
}

/// A daily wall-clock window `[start, end)`.
///
/// When `end < start` the window wraps past midnight (e.g. 22:00–05:00).
/// A window with `start == end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// End of the window (exclusive).
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window from `HH`/`MM` pairs.
    ///
    /// # Panics
    ///
    /// Panics if an hour is above 23 or a minute above 59.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: wall_clock(start.0, start.1),
            end: wall_clock(end.0, end.1),
        }
    }

    /// The CLT urban night window, 22:00–05:00.
    pub fn legal_night() -> Self {
        Self::from_hm((22, 0), (5, 0))
    }

    /// The fixed 08:00–17:00 window used for lateness and early departure.
    pub fn standard_business_day() -> Self {
        Self::from_hm((8, 0), (17, 0))
    }

    /// Returns true if the window crosses midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }
}

/// Work-hour policy used by the daily calculator and the weekly aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHoursConfig {
    /// Regular hours per day before overtime starts.
    pub regular_hours_per_day: Decimal,
    /// Daily overtime soft cap, in hours.
    pub max_overtime_per_day: Decimal,
    /// Weekly overtime cap, in hours.
    pub max_overtime_per_week: Decimal,
    /// Expected break length, in minutes.
    pub break_time_minutes: i64,
    /// Tolerance applied to lateness, early departure and break length.
    pub tolerance_minutes: i64,
    /// Scheduled work days per week.
    pub work_days_per_week: u32,
    /// Night window for the night-shift premium.
    pub night_shift_window: TimeWindow,
    /// Whether night-shift minutes are computed at all.
    pub calculate_night_shift: bool,
    /// Reference window for lateness and early departure.
    #[serde(default = "TimeWindow::standard_business_day")]
    pub reference_window: TimeWindow,
}

impl Default for WorkHoursConfig {
    fn default() -> Self {
        Self {
            regular_hours_per_day: Decimal::new(8, 0),
            max_overtime_per_day: Decimal::new(2, 0),
            max_overtime_per_week: Decimal::new(10, 0),
            break_time_minutes: 60,
            tolerance_minutes: 10,
            work_days_per_week: 5,
            night_shift_window: TimeWindow::legal_night(),
            calculate_night_shift: true,
            reference_window: TimeWindow::standard_business_day(),
        }
    }
}

impl WorkHoursConfig {
    /// Regular daily allowance in minutes.
    pub fn regular_minutes_per_day(&self) -> i64 {
        hours_to_minutes(self.regular_hours_per_day)
    }

    /// Daily overtime soft cap in minutes.
    pub fn max_overtime_minutes_per_day(&self) -> i64 {
        hours_to_minutes(self.max_overtime_per_day)
    }

    /// Weekly overtime cap in minutes.
    pub fn max_overtime_minutes_per_week(&self) -> i64 {
        hours_to_minutes(self.max_overtime_per_week)
    }

    /// Rejects values the calculators cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.regular_hours_per_day <= Decimal::ZERO || self.regular_hours_per_day > Decimal::new(24, 0) {
            return Err(EngineError::invalid_config(
                "regular_hours_per_day",
                "must be greater than 0 and at most 24",
            ));
        }
        if self.max_overtime_per_day < Decimal::ZERO {
            return Err(EngineError::invalid_config("max_overtime_per_day", "must not be negative"));
        }
        if self.max_overtime_per_week < Decimal::ZERO {
            return Err(EngineError::invalid_config("max_overtime_per_week", "must not be negative"));
        }
        if self.break_time_minutes < 0 {
            return Err(EngineError::invalid_config("break_time_minutes", "must not be negative"));
        }
        if self.tolerance_minutes < 0 {
            return Err(EngineError::invalid_config("tolerance_minutes", "must not be negative"));
        }
        if self.work_days_per_week == 0 || self.work_days_per_week > 7 {
            return Err(EngineError::invalid_config(
                "work_days_per_week",
                "must be between 1 and 7",
            ));
        }
        Ok(())
    }
}

/// Salary policy used by the payroll engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryConfig {
    /// Contracted monthly salary.
    pub base_salary: Decimal,
    /// Contracted hours per day.
    pub work_hours_per_day: Decimal,
    /// Contracted days per week.
    pub work_days_per_week: u32,
    /// Expected work days per month.
    pub work_days_per_month: u32,
    /// Lateness tolerance recorded with the salary policy. Payroll reads the
    /// late-day count only; lateness is judged by
    /// `WorkHoursConfig::tolerance_minutes`.
    pub tolerance_minutes: i64,
    /// Daily-rate multiplier discounted per absence.
    pub discount_per_absence: Decimal,
    /// Daily-rate multiplier discounted per late day.
    pub discount_per_late: Decimal,
    /// Daily-rate multiplier discounted per early departure.
    pub discount_per_early_departure: Decimal,
    /// Overtime multiplier (1.5 = 50% premium).
    pub overtime_rate: Decimal,
    /// Night-shift multiplier (1.2 = 20% premium).
    pub night_shift_rate: Decimal,
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self {
            base_salary: Decimal::ZERO,
            work_hours_per_day: Decimal::new(8, 0),
            work_days_per_week: 5,
            work_days_per_month: 22,
            tolerance_minutes: 10,
            discount_per_absence: Decimal::ONE,
            discount_per_late: Decimal::new(1, 1),
            discount_per_early_departure: Decimal::new(1, 1),
            overtime_rate: Decimal::new(15, 1),
            night_shift_rate: Decimal::new(12, 1),
        }
    }
}

impl SalaryConfig {
    /// Returns a copy with a different base salary.
    pub fn with_base_salary(&self, base_salary: Decimal) -> Self {
        Self {
            base_salary,
            ..self.clone()
        }
    }

    /// Rejects values the payroll engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::invalid_config("base_salary", "must not be negative"));
        }
        if self.base_salary > MAX_BASE_SALARY {
            return Err(EngineError::invalid_config(
                "base_salary",
                format!("must not exceed {}", MAX_BASE_SALARY),
            ));
        }
        if hours_to_minutes(self.work_hours_per_day) < 1
            || self.work_hours_per_day > Decimal::from(24)
        {
            return Err(EngineError::invalid_config(
                "work_hours_per_day",
                "must be between one minute and 24 hours",
            ));
        }
        if self.work_days_per_week == 0 || self.work_days_per_week > 7 {
            return Err(EngineError::invalid_config(
                "work_days_per_week",
                "must be between 1 and 7",
            ));
        }
        if self.work_days_per_month == 0 || self.work_days_per_month > 31 {
            return Err(EngineError::invalid_config(
                "work_days_per_month",
                "must be between 1 and 31",
            ));
        }
        let multipliers = [
            ("discount_per_absence", self.discount_per_absence),
            ("discount_per_late", self.discount_per_late),
            ("discount_per_early_departure", self.discount_per_early_departure),
            ("overtime_rate", self.overtime_rate),
            ("night_shift_rate", self.night_shift_rate),
        ];
        for (field, value) in multipliers {
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_config(field, "must not be negative"));
            }
            if value > MAX_RATE_MULTIPLIER {
                return Err(EngineError::invalid_config(
                    field,
                    format!("must not exceed {}", MAX_RATE_MULTIPLIER),
                ));
            }
        }
        Ok(())
    }
}

/// Hour bank policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBankConfig {
    /// Minutes debited for every incomplete day.
    pub absence_debit_minutes: i64,
    /// Credits above this many minutes trigger a warning.
    pub credit_limit_minutes: i64,
}

impl Default for HourBankConfig {
    fn default() -> Self {
        Self {
            absence_debit_minutes: 8 * 60,
            credit_limit_minutes: 40 * 60,
        }
    }
}

impl HourBankConfig {
    /// Rejects negative limits.
    pub fn validate(&self) -> EngineResult<()> {
        if self.absence_debit_minutes < 0 {
            return Err(EngineError::invalid_config("absence_debit_minutes", "must not be negative"));
        }
        if self.credit_limit_minutes < 0 {
            return Err(EngineError::invalid_config("credit_limit_minutes", "must not be negative"));
        }
        Ok(())
    }
}

/// The complete policy for one company or employee group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    work_hours: WorkHoursConfig,
    salary: SalaryConfig,
    hour_bank: HourBankConfig,
}

impl PolicyConfig {
    /// Creates a policy from its parts.
    pub fn new(work_hours: WorkHoursConfig, salary: SalaryConfig, hour_bank: HourBankConfig) -> Self {
        Self {
            work_hours,
            salary,
            hour_bank,
        }
    }

    /// Returns the work-hour policy.
    pub fn work_hours(&self) -> &WorkHoursConfig {
        &self.work_hours
    }

    /// Returns the salary policy.
    pub fn salary(&self) -> &SalaryConfig {
        &self.salary
    }

    /// Returns the hour bank policy.
    pub fn hour_bank(&self) -> &HourBankConfig {
        &self.hour_bank
    }

    /// Validates every part.
    pub fn validate(&self) -> EngineResult<()> {
        self.work_hours.validate()?;
        self.salary.validate()?;
        self.hour_bank.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_hours_defaults() {
        let config = WorkHoursConfig::default();
        assert_eq!(config.regular_minutes_per_day(), 480);
        assert_eq!(config.max_overtime_minutes_per_day(), 120);
        assert_eq!(config.max_overtime_minutes_per_week(), 600);
        assert!(config.night_shift_window.wraps_midnight());
        assert!(!config.reference_window.wraps_midnight());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fractional_hours_truncate_to_minutes() {
        // 44h / 6 days = 7.3333h
        assert_eq!(hours_to_minutes(Decimal::new(73333, 4)), 439);
        assert_eq!(hours_to_minutes(Decimal::new(75, 1)), 450);
    }

    #[test]
    fn test_time_window_serializes_as_hh_mm() {
        let json = serde_json::to_string(&TimeWindow::legal_night()).unwrap();
        assert_eq!(json, r#"{"start":"22:00","end":"05:00"}"#);

        let parsed: TimeWindow = serde_json::from_str(r#"{"start":"21:30","end":"06:15"}"#).unwrap();
        assert_eq!(parsed, TimeWindow::from_hm((21, 30), (6, 15)));
    }

    #[test]
    fn test_time_window_rejects_bad_time() {
        assert!(serde_json::from_str::<TimeWindow>(r#"{"start":"25:00","end":"05:00"}"#).is_err());
    }

    #[test]
    fn test_reference_window_defaults_when_absent() {
        let yaml = r#"
regular_hours_per_day: "8"
max_overtime_per_day: "2"
max_overtime_per_week: "10"
break_time_minutes: 60
tolerance_minutes: 10
work_days_per_week: 5
night_shift_window:
  start: "22:00"
  end: "05:00"
calculate_night_shift: true
"#;
        let config: WorkHoursConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.reference_window, TimeWindow::standard_business_day());
    }

    #[test]
    fn test_invalid_work_hours_rejected() {
        let config = WorkHoursConfig {
            regular_hours_per_day: Decimal::ZERO,
            ..WorkHoursConfig::default()
        };
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "regular_hours_per_day")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_salary_rejected() {
        let config = SalaryConfig {
            work_days_per_month: 0,
            ..SalaryConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SalaryConfig {
            overtime_rate: Decimal::new(-15, 1),
            ..SalaryConfig::default()
        };
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "overtime_rate"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_salary_rejected() {
        let config = SalaryConfig::default().with_base_salary(MAX_BASE_SALARY + Decimal::ONE);
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "base_salary"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }

        let config = SalaryConfig::default().with_base_salary(MAX_BASE_SALARY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_base_salary_keeps_policy() {
        let config = SalaryConfig::default().with_base_salary(Decimal::new(3500, 0));
        assert_eq!(config.base_salary, Decimal::new(3500, 0));
        assert_eq!(config.work_days_per_month, 22);
    }

    #[test]
    fn test_hour_bank_defaults() {
        let config = HourBankConfig::default();
        assert_eq!(config.absence_debit_minutes, 480);
        assert_eq!(config.credit_limit_minutes, 2400);
        assert!(PolicyConfig::default().validate().is_ok());
    }
}
