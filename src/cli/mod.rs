//! CLI command handling
//!
//! Resolves configuration, runs the requested checks, and writes reports.

use colored::Colorize;

use crate::commands::{Commands, TargetArgs};
use crate::common::config::{Config, Overrides};
use crate::common::Result;
use crate::probe::{ApiClient, Check};
use crate::testing::{self, Runner};

/// Dispatch a CLI command
///
/// Returns whether every check passed. Errors are reserved for problems
/// that prevent the run itself.
pub async fn dispatch(command: Commands, verbose: bool) -> Result<bool> {
    match command {
        Commands::Run {
            target,
            results,
            news_ticker_output,
            suite,
        } => {
            let config = load_config(
                &target,
                Overrides {
                    results,
                    news_ticker: news_ticker_output,
                    ..Default::default()
                },
            )?;

            let suite = suite.as_deref().map(testing::load_suite).transpose()?;
            let client = build_client(&config)?;

            let report = testing::run_all(Runner::new(client, verbose), suite.as_ref()).await;
            report.write(&config.output.results, &config.output.news_ticker)?;

            Ok(report.passed())
        }

        Commands::Check {
            path,
            target,
            method,
            status,
            content_type,
            non_empty,
            body,
        } => {
            let config = load_config(&target, Overrides::default())?;
            let client = build_client(&config)?;

            let mut check = Check::new(
                format!("{} /{}", method, path.trim_start_matches('/')),
                method,
                path.trim_start_matches('/'),
            )
            .expect_status(status);
            if let Some(body) = body {
                check = check.with_body(serde_json::from_str(&body)?);
            }
            if let Some(content_type) = content_type {
                check = check.expect_content_type(content_type);
            }
            if non_empty {
                check = check.expect_non_empty();
            }

            let mut runner = Runner::new(client, verbose);
            let passed = runner.check(&check).await.passed();

            if passed {
                println!("\n{}", "Check passed".green().bold());
            } else {
                println!("\n{}", "Check failed".red().bold());
            }
            Ok(passed)
        }
    }
}

/// Load the config file, then apply command line overrides
fn load_config(target: &TargetArgs, mut overrides: Overrides) -> Result<Config> {
    let mut config = match &target.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    overrides.base_url = target.base_url.clone();
    overrides.env_file = target.env_file.clone();
    overrides.timeout_secs = target.timeout;
    config.apply(overrides);

    Ok(config)
}

fn build_client(config: &Config) -> Result<ApiClient> {
    let base_url = config.resolve_base_url()?;
    tracing::info!(base_url = %base_url, "Using backend URL");
    if let Some(timeout) = config.request_timeout() {
        tracing::debug!(?timeout, "Request timeout set");
    }
    ApiClient::new(base_url, config.request_timeout())
}
