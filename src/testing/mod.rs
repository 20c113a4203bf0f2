//! Backend test runner
//!
//! Runs the fixed list of endpoint scenarios against the backend, keeps a
//! PASS/FAIL/ERROR record per check, and produces a machine-readable report.
//! Responses are decoded against declared schemas rather than probed for
//! loose keys.

mod config;
mod report;
mod runner;
pub mod scenarios;

pub use config::*;
pub use report::{format_success_rate, CheckResult, CheckStatus, RunReport, RunSummary, ScenarioVerdict};
pub use runner::Runner;
pub use scenarios::run_all;
