//! Client configuration.
//!
//! `ClientConfig::from_env` loads a `.env` file if one exists, then reads:
//! - `POSTS_API_URL`: server origin (default `http://localhost:3000`)
//! - `POSTS_API_TIMEOUT_SECS`: per-request timeout (default 30)

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("POSTS_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("POSTS_API_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("POSTS_API_TIMEOUT_SECS"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("POSTS_API_URL", "http://blog.internal:8080"),
            ("POSTS_API_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://blog.internal:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("POSTS_API_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("POSTS_API_TIMEOUT_SECS"));
    }
}
