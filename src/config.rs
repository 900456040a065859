//! API configuration loaded from the environment

use crate::{
    constants::{
        API_BASE_URL_ENV, API_KEY_ENV, DEFAULT_API_BASE_URL, REQUEST_TIMEOUT_ENV,
        REQUEST_TIMEOUT_SECS,
    },
    error::ConfigError,
};
use std::time::Duration;

/// Connection settings for the CoinGecko API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Demo API key sent with every request
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the default base URL
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Overrides the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] when `COINGECKO_API_KEY` is unset
    /// and [`ConfigError::InvalidValue`] for unusable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingVar(API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(API_BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            let base_url = normalize_base_url(&base_url);
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    API_BASE_URL_ENV,
                    format!("expected an http(s) URL, got {:?}", base_url),
                ));
            }
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(REQUEST_TIMEOUT_ENV, format!("{}", e)))?;
            if secs == 0 {
                return Err(ConfigError::invalid(
                    REQUEST_TIMEOUT_ENV,
                    "timeout must be greater than zero",
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
