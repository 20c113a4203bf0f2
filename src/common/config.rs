//! Configuration file handling and backend URL resolution

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::{self, config_path};
use super::{Error, Result};

/// Key looked up in the frontend environment file
const BACKEND_URL_KEY: &str = "REACT_APP_BACKEND_URL=";

/// Used when no other source names a backend
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where the backend lives
    #[serde(default)]
    pub backend: BackendConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Report file locations
    #[serde(default)]
    pub output: OutputConfig,
}

/// Backend location settings
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Explicit base URL; takes precedence over the environment file
    pub url: Option<String>,

    /// Environment file holding `REACT_APP_BACKEND_URL`
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            env_file: default_env_file(),
        }
    }
}

fn default_env_file() -> PathBuf {
    PathBuf::from(paths::DEFAULT_ENV_FILE)
}

/// Timeout settings in seconds
///
/// Requests block until the backend answers unless a timeout is set.
#[derive(Debug, Deserialize, Default)]
pub struct Timeouts {
    /// Per-request timeout
    pub request_secs: Option<u64>,
}

/// Report output configuration
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// JSON dump of every check result
    #[serde(default = "default_results")]
    pub results: PathBuf,

    /// JSON dump of the last news ticker payload
    #[serde(default = "default_news_ticker")]
    pub news_ticker: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results: default_results(),
            news_ticker: default_news_ticker(),
        }
    }
}

fn default_results() -> PathBuf {
    PathBuf::from(paths::DEFAULT_RESULTS_FILE)
}

fn default_news_ticker() -> PathBuf {
    PathBuf::from(paths::DEFAULT_NEWS_TICKER_FILE)
}

/// Values given on the command line, applied over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub env_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub results: Option<PathBuf>,
    pub news_ticker: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply command line overrides
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.base_url {
            self.backend.url = Some(url);
        }
        if let Some(env_file) = overrides.env_file {
            self.backend.env_file = env_file;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeouts.request_secs = Some(secs);
        }
        if let Some(results) = overrides.results {
            self.output.results = results;
        }
        if let Some(news_ticker) = overrides.news_ticker {
            self.output.news_ticker = news_ticker;
        }
    }

    /// Per-request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeouts.request_secs.map(Duration::from_secs)
    }

    /// Resolve the backend base URL
    ///
    /// Order: explicit URL, then the environment file, then
    /// [`DEFAULT_BACKEND_URL`]. An unreadable environment file is not fatal.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Some(url) = &self.backend.url {
            return normalize_base_url(url);
        }

        match read_backend_url(&self.backend.env_file) {
            Ok(Some(url)) => {
                tracing::debug!(env_file = %self.backend.env_file.display(), "Backend URL from environment file");
                return normalize_base_url(&url);
            }
            Ok(None) => {
                tracing::debug!(
                    env_file = %self.backend.env_file.display(),
                    "No REACT_APP_BACKEND_URL entry, using default"
                );
            }
            Err(e) => {
                tracing::warn!(
                    env_file = %self.backend.env_file.display(),
                    "Error reading REACT_APP_BACKEND_URL from environment file: {}",
                    e
                );
            }
        }

        normalize_base_url(DEFAULT_BACKEND_URL)
    }
}

/// Read the backend URL entry from an environment file
pub fn read_backend_url(path: &Path) -> std::io::Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_backend_url(&content))
}

/// Find the first `REACT_APP_BACKEND_URL=` line and return its value
///
/// Surrounding quotes are stripped. An empty value counts as absent.
pub fn parse_backend_url(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| line.starts_with(BACKEND_URL_KEY))
        .and_then(|line| line.trim().split_once('='))
        .map(|(_, value)| value.trim_matches(|c: char| c == '"' || c == '\''))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Validate a base URL and drop any trailing slash
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let parsed =
        reqwest::Url::parse(trimmed).map_err(|e| Error::invalid_base_url(url, &e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(Error::invalid_base_url(
            url,
            &format!("unsupported scheme '{}'", scheme),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_backend_url_plain() {
        let env = "NODE_ENV=production\nREACT_APP_BACKEND_URL=https://api.example.md\n";
        assert_eq!(
            parse_backend_url(env).as_deref(),
            Some("https://api.example.md")
        );
    }

    #[test]
    fn test_parse_backend_url_strips_quotes() {
        assert_eq!(
            parse_backend_url("REACT_APP_BACKEND_URL=\"http://backend:8001\"").as_deref(),
            Some("http://backend:8001")
        );
        assert_eq!(
            parse_backend_url("REACT_APP_BACKEND_URL='http://backend:8001'  ").as_deref(),
            Some("http://backend:8001")
        );
    }

    #[test]
    fn test_parse_backend_url_keeps_equals_in_value() {
        assert_eq!(
            parse_backend_url("REACT_APP_BACKEND_URL=http://host/?a=b").as_deref(),
            Some("http://host/?a=b")
        );
    }

    #[test]
    fn test_parse_backend_url_missing_or_empty() {
        assert_eq!(parse_backend_url("OTHER=1\n"), None);
        assert_eq!(parse_backend_url("REACT_APP_BACKEND_URL=\n"), None);
        // Indented or commented entries are not picked up
        assert_eq!(parse_backend_url("# REACT_APP_BACKEND_URL=http://x\n"), None);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8001/").unwrap(),
            "http://localhost:8001"
        );
        assert!(normalize_base_url("ftp://localhost").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.backend.env_file = dir.path().join("missing.env");
        assert_eq!(config.resolve_base_url().unwrap(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_resolve_prefers_env_file_over_default() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "REACT_APP_BACKEND_URL=http://from-env:9000\n").unwrap();

        let mut config = Config::default();
        config.backend.env_file = env_file;
        assert_eq!(config.resolve_base_url().unwrap(), "http://from-env:9000");
    }

    #[test]
    fn test_resolve_prefers_override_over_env_file() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "REACT_APP_BACKEND_URL=http://from-env:9000\n").unwrap();

        let mut config = Config::default();
        config.apply(Overrides {
            base_url: Some("http://cli:1234/".to_string()),
            env_file: Some(env_file),
            ..Default::default()
        });
        assert_eq!(config.resolve_base_url().unwrap(), "http://cli:1234");
    }

    #[test]
    fn test_config_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.env_file, PathBuf::from(paths::DEFAULT_ENV_FILE));
        assert_eq!(config.output.results, PathBuf::from("backend_test_results.json"));
        assert_eq!(config.output.news_ticker, PathBuf::from("news_ticker_data.json"));
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            url = "http://staging:8001"

            [timeouts]
            request_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.url.as_deref(), Some("http://staging:8001"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }
}
