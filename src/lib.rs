//! Ponto Engine: time-to-payroll calculation for Brazilian time tracking
//!
//! This crate turns raw clock punches (entry, exit, break) into daily, weekly
//! and monthly work-time summaries, detects attendance anomalies (lateness,
//! early departure, overtime, night-shift work), and derives a proportional
//! salary and an hour-bank ledger from them.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod report;
