//! Configuration and default file locations

use std::path::PathBuf;

/// Name used for the project directories
const APP_NAME: &str = "anipm-probe";

/// Environment file written by the frontend deployment
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

/// Default location of the per-check results dump
pub const DEFAULT_RESULTS_FILE: &str = "backend_test_results.json";

/// Default location of the news ticker sample dump
pub const DEFAULT_NEWS_TICKER_FILE: &str = "news_ticker_data.json";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/anipm-probe/`
/// - macOS: `~/Library/Application Support/anipm-probe/`
/// - Windows: `%APPDATA%\anipm-probe\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
