//! ANIPM backend probe
//!
//! This library drives HTTP checks against a running ANIPM backend and
//! reports PASS, FAIL or ERROR for each of them.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod probe;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use probe::{ApiClient, Check, Outcome};
