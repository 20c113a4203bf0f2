//! CLI command definitions
//!
//! Defines the clap commands for the probe CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::probe::Method;

#[derive(Subcommand)]
pub enum Commands {
    /// Run every backend scenario and write the reports
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Where to write the per-check results (default: backend_test_results.json)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Where to write the news ticker sample (default: news_ticker_data.json)
        #[arg(long)]
        news_ticker_output: Option<PathBuf>,

        /// YAML file with extra checks to run after the built-in scenarios
        #[arg(long)]
        suite: Option<PathBuf>,
    },

    /// Send a single check to one endpoint
    Check {
        /// Path below /api/ (e.g. "status" or "download/minist1.pdf")
        path: String,

        #[command(flatten)]
        target: TargetArgs,

        /// HTTP method
        #[arg(long, short = 'X', value_enum, default_value_t = Method::Get)]
        method: Method,

        /// Expected status code
        #[arg(long, default_value = "200")]
        status: u16,

        /// Substring the response Content-Type must contain
        #[arg(long)]
        content_type: Option<String>,

        /// Require a non-empty response body
        #[arg(long)]
        non_empty: bool,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
}

/// Options selecting and reaching the backend
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Backend base URL (overrides the config and environment file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Environment file holding REACT_APP_BACKEND_URL (default: /app/frontend/.env)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Configuration file (default: platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
