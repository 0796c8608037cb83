//! Policy configuration for the Ponto Engine.
//!
//! Policies are explicit values passed to each calculation. They can be built
//! in code (every type implements `Default`) or loaded from a directory of
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use ponto_engine::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config/default").unwrap();
//! println!("Base salary: {}", loader.salary().base_salary);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub(crate) use types::hours_to_minutes;
pub use types::{
    HourBankConfig, MAX_BASE_SALARY, PolicyConfig, SalaryConfig, TimeWindow, WorkHoursConfig,
};
