//! Check suite configuration types
//!
//! Defines the data structures for deserializing YAML check suites that
//! run after the built-in scenarios.

use serde::Deserialize;
use std::path::Path;

use crate::common::{Error, Result};
use crate::probe::{Check, Method};

/// A set of extra checks loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct CheckSuite {
    /// Name used for the suite's verdict line
    pub name: String,
    /// Optional description printed before the checks run
    pub description: Option<String>,
    /// Checks in execution order
    pub checks: Vec<CheckSpec>,
}

/// A single check as written in a suite file
#[derive(Deserialize, Debug)]
pub struct CheckSpec {
    pub name: String,
    /// HTTP method (default: get)
    #[serde(default)]
    pub method: Method,
    /// Path below `/api/`
    pub path: String,
    /// JSON body to send
    pub body: Option<serde_json::Value>,
    #[serde(default)]
    pub expect: Expectation,
}

/// Expectations on the response
#[derive(Deserialize, Debug)]
pub struct Expectation {
    /// Expected status code (default: 200)
    #[serde(default = "default_status")]
    pub status: u16,
    /// Substring of the expected `Content-Type`
    pub content_type: Option<String>,
    /// Whether the body must be non-empty
    #[serde(default)]
    pub non_empty: bool,
}

impl Default for Expectation {
    fn default() -> Self {
        Self {
            status: default_status(),
            content_type: None,
            non_empty: false,
        }
    }
}

fn default_status() -> u16 {
    200
}

impl CheckSpec {
    pub fn to_check(&self) -> Check {
        let mut check = Check::new(
            self.name.clone(),
            self.method,
            self.path.trim_start_matches('/'),
        )
        .expect_status(self.expect.status);

        if let Some(body) = &self.body {
            check = check.with_body(body.clone());
        }
        if let Some(content_type) = &self.expect.content_type {
            check = check.expect_content_type(content_type.clone());
        }
        if self.expect.non_empty {
            check = check.expect_non_empty();
        }
        check
    }
}

/// Load and parse a suite file
pub fn load_suite(path: &Path) -> Result<CheckSuite> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    parse_suite(&content).map_err(|e| Error::SuiteParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_suite(content: &str) -> std::result::Result<CheckSuite, serde_yaml::Error> {
    serde_yaml::from_str(content)
}
