//! Client configuration baked in at build time.
//!
//! The browser has no process environment, so values come from `option_env!`
//! when the WASM bundle is compiled:
//! - `FLAVALIA_API_BASE_URL`: backend origin, default `http://localhost:8080`
//! - `FLAVALIA_SESSION_POLL_SECS`: token validity poll interval, default 30

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("api base url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("poll interval must be a positive number of seconds, got '{0}'")]
    InvalidPollInterval(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl ClientConfig {
    /// Build config from the variables captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a captured value is malformed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("FLAVALIA_API_BASE_URL"), option_env!("FLAVALIA_SESSION_POLL_SECS"))
    }

    /// Like [`ClientConfig::from_build_env`], but logs and falls back to
    /// defaults instead of failing.
    pub fn load() -> Self {
        Self::from_build_env().unwrap_or_else(|e| {
            log::warn!("config: {e}; using defaults");
            Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is present but malformed.
    pub fn from_values(base_url: Option<&str>, poll_secs: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self { api_base_url: parse_base_url(base_url)?, poll_interval: parse_poll_interval(poll_secs)? })
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_BASE_URL);
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_poll_interval(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidPollInterval(raw.to_owned())),
    }
}
