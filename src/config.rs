//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

/// Backend base URL override
pub const API_BASE_VAR: &str = "PROPAI_API_BASE";
/// `development` or `production`
pub const ENV_MODE_VAR: &str = "PROPAI_ENV";
/// Location of the persisted property list
pub const STATE_PATH_VAR: &str = "PROPAI_STATE_PATH";
/// Location of the log file
pub const LOG_PATH_VAR: &str = "PROPAI_LOG_PATH";
/// HTTP timeout in seconds
pub const TIMEOUT_VAR: &str = "PROPAI_TIMEOUT_SECS";

/// Fallback backend in development
pub const DEV_API_BASE: &str = "http://localhost:8000";
/// Fallback backend everywhere else
pub const PUBLIC_API_BASE: &str = "https://prop-ai.onrender.com";

const DEFAULT_STATE_PATH: &str = "./app_data/properties.json";
const DEFAULT_LOG_PATH: &str = "./app_data/propai.log";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Deployment mode, which picks the fallback backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvMode {
    /// Local development (loopback backend)
    Development,
    /// Anything else (public backend)
    Production,
}

impl EnvMode {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "development" || v == "dev" => Self::Development,
            Some(v) if !v.is_empty() => Self::Production,
            _ if cfg!(debug_assertions) => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Runtime configuration for the dashboard
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without trailing slash
    pub api_base: String,
    /// Deployment mode
    pub mode: EnvMode,
    /// JSON file holding the property list
    pub state_path: PathBuf,
    /// Log file
    pub log_path: PathBuf,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = EnvMode::parse(lookup(ENV_MODE_VAR).as_deref());

        let api_base = lookup(API_BASE_VAR)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| match mode {
                EnvMode::Development => DEV_API_BASE.to_string(),
                EnvMode::Production => PUBLIC_API_BASE.to_string(),
            });

        let state_path = lookup(STATE_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string())
            .into();

        let log_path = lookup(LOG_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string())
            .into();

        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base,
            mode,
            state_path,
            log_path,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
