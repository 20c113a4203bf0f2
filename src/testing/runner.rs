//! Test runner implementation
//!
//! Sends checks one at a time, prints a line per check, and keeps the
//! tally and the ordered result list for the report.

use std::fmt::Display;

use colored::Colorize;
use serde::de::DeserializeOwned;

use crate::api::NewsTicker;
use crate::probe::{ApiClient, Check, Outcome};

use super::report::{CheckResult, RunReport, RunSummary, ScenarioVerdict};

/// Drives checks against one backend
pub struct Runner {
    client: ApiClient,
    verbose: bool,
    summary: RunSummary,
    results: Vec<CheckResult>,
    verdicts: Vec<ScenarioVerdict>,
}

impl Runner {
    pub fn new(client: ApiClient, verbose: bool) -> Self {
        Self {
            client,
            verbose,
            summary: RunSummary::default(),
            results: Vec::new(),
            verdicts: Vec::new(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Run one check and record its result
    pub async fn check(&mut self, check: &Check) -> Outcome {
        self.announce(check);
        let outcome = self.client.execute(check).await;
        self.record(check, &outcome);
        outcome
    }

    /// Run one check and decode a passing reply against schema `T`
    ///
    /// A body that does not decode is recorded as an error for this check.
    pub async fn check_json<T: DeserializeOwned>(&mut self, check: &Check) -> (Outcome, Option<T>) {
        self.announce(check);
        let (outcome, value) = self.client.execute(check).await.decode::<T>();
        self.record(check, &outcome);
        (outcome, value)
    }

    /// Print a scenario-level detail line
    pub fn note(&self, ok: bool, message: impl Display) {
        if ok {
            println!("   {} {}", "✓".green(), message);
        } else {
            println!("   {} {}", "✗".red(), message);
        }
    }

    /// Record the verdict of a named scenario
    pub fn verdict(&mut self, scenario: &str, passed: bool) {
        if passed {
            println!("\n{} {}", "✓".green().bold(), format!("{} working correctly", scenario).green());
        } else {
            println!("\n{} {}", "✗".red().bold(), format!("{} failed", scenario).red());
        }
        tracing::debug!(scenario, passed, "Scenario finished");
        self.verdicts.push(ScenarioVerdict {
            name: scenario.to_string(),
            passed,
        });
    }

    /// Close the run
    pub fn finish(self, news_ticker: Option<NewsTicker>) -> RunReport {
        RunReport {
            summary: self.summary,
            results: self.results,
            verdicts: self.verdicts,
            news_ticker,
        }
    }

    fn announce(&self, check: &Check) {
        println!("\n{} {}...", "Testing".blue().bold(), check.name.white().bold());
        println!(
            "   {} {}",
            check.method.to_string().dimmed(),
            self.client.endpoint_url(&check.path).dimmed()
        );
    }

    fn record(&mut self, check: &Check, outcome: &Outcome) {
        match outcome {
            Outcome::Passed(reply) => {
                println!("   {} Passed - Status: {}", "✓".green(), reply.status);
                if check.content_type.is_some() {
                    println!(
                        "   {} Content-Type: {}",
                        "✓".green(),
                        reply.content_type.as_deref().unwrap_or("")
                    );
                }
                if check.non_empty {
                    println!("   {} Content Length: {} bytes", "✓".green(), reply.body.len());
                }
                if self.verbose && !reply.body.is_empty() {
                    println!("   {}", preview(&reply.body).dimmed());
                }
            }
            Outcome::Failed { violations, .. } => {
                for violation in violations {
                    println!("   {} Failed - {}", "✗".red(), violation);
                }
            }
            Outcome::Transport(message) => {
                println!("   {} Error - {}", "✗".red(), message);
            }
            Outcome::Decode { message, .. } => {
                println!("   {} Error - {}", "✗".red(), message);
            }
        }

        self.summary.record(outcome.passed());
        self.results.push(CheckResult::from_outcome(check, outcome));
    }
}

/// First few hundred characters of a body, for verbose output
fn preview(body: &[u8]) -> String {
    const LIMIT: usize = 300;
    let text = String::from_utf8_lossy(body);
    let mut preview: String = text.chars().take(LIMIT).collect();
    if text.chars().count() > LIMIT {
        preview.push_str("...");
    }
    preview.replace('\n', " ")
}
