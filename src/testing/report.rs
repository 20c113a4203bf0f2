//! Run results and their on-disk form

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::api::NewsTicker;
use crate::common::{Error, Result};
use crate::probe::{Check, ErrorKind, Outcome};

/// Verdict of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    /// The server answered and met every expectation
    Pass,
    /// The server answered but violated an expectation
    Fail,
    /// The request failed, or the body did not match its schema
    Error,
}

/// Recorded result of one check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Parsed JSON body of a passing check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Expected status code of a check that did not pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u16>,
    /// Violated expectations of a failing check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl CheckResult {
    pub fn from_outcome(check: &Check, outcome: &Outcome) -> Self {
        let mut result = Self {
            name: check.name.clone(),
            status: CheckStatus::Error,
            response_code: outcome.reply().map(|r| r.status),
            content_type: outcome.reply().and_then(|r| r.content_type.clone()),
            data: None,
            expected: None,
            reason: None,
            error: None,
            error_kind: outcome.error_kind(),
        };

        match outcome {
            Outcome::Passed(reply) => {
                result.status = CheckStatus::Pass;
                if reply.is_json() {
                    result.data = Some(
                        reply
                            .json::<Value>()
                            .unwrap_or_else(|_| Value::String("Non-JSON content".to_string())),
                    );
                }
            }
            Outcome::Failed { violations, .. } => {
                result.status = CheckStatus::Fail;
                result.expected = Some(check.expected_status);
                result.reason = Some(violations.join("; "));
            }
            Outcome::Transport(message) => {
                result.error = Some(message.clone());
            }
            Outcome::Decode { message, .. } => {
                result.expected = Some(check.expected_status);
                result.error = Some(message.clone());
            }
        }

        result
    }
}

/// Running tally of checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub tests_run: usize,
    pub tests_passed: usize,
}

impl RunSummary {
    /// Count one check
    pub fn record(&mut self, passed: bool) {
        self.tests_run += 1;
        if passed {
            self.tests_passed += 1;
        }
    }

    /// Percentage of passing checks; 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.tests_run == 0 {
            return 0.0;
        }
        self.tests_passed as f64 / self.tests_run as f64 * 100.0
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }
}

/// Outcome of one named scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioVerdict {
    pub name: String,
    pub passed: bool,
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    pub results: Vec<CheckResult>,
    pub verdicts: Vec<ScenarioVerdict>,
    /// Last news ticker payload that decoded
    pub news_ticker: Option<NewsTicker>,
}

impl RunReport {
    /// True when every check and every scenario passed
    pub fn passed(&self) -> bool {
        self.summary.all_passed() && self.verdicts.iter().all(|v| v.passed)
    }

    /// Print the summary block
    pub fn print_summary(&self) {
        println!("\n{}", "Test Results Summary".blue().bold());
        println!("==================================");
        println!("Tests Run: {}", self.summary.tests_run);
        println!("Tests Passed: {}", self.summary.tests_passed);
        println!("Success Rate: {}", format_success_rate(&self.summary));

        let failed: Vec<&str> = self
            .verdicts
            .iter()
            .filter(|v| !v.passed)
            .map(|v| v.name.as_str())
            .collect();
        if !failed.is_empty() {
            println!("Failed Scenarios: {}", failed.join(", ").red());
        }
    }

    /// Write the results dump and, when available, the news ticker sample
    ///
    /// Existing files are overwritten.
    pub fn write(&self, results_path: &Path, news_ticker_path: &Path) -> Result<()> {
        write_json(results_path, &self.results)?;
        tracing::info!(path = %results_path.display(), "Wrote test results");

        if let Some(ticker) = &self.news_ticker {
            write_json(news_ticker_path, ticker)?;
            tracing::info!(path = %news_ticker_path.display(), "Wrote news ticker data");
        }
        Ok(())
    }
}

/// Success rate with one decimal place, e.g. `87.5%`
pub fn format_success_rate(summary: &RunSummary) -> String {
    format!("{:.1}%", summary.success_rate())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| Error::file_write(path, e))
}
