//! Error types for the market dashboard SDK

use thiserror::Error;

/// Errors that can occur when fetching data from the market API
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed before a response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Request failed with status code {status}")]
    Api {
        status: u16,
        /// Message extracted from the structured error body, if any
        message: Option<String>,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("Request failed with status code 429")]
    RateLimitExceeded {
        /// Message extracted from the structured error body, if any
        message: Option<String>,
    },

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request was rejected before reaching the network
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Creates an Api error
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Creates an InvalidResponse error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Creates an InvalidRequest error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Message carried by the upstream error body, if the failure had one
    pub fn body_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::RateLimitExceeded { message } => message
                .as_deref()
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimitExceeded { .. } => Some(429),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors that can occur while loading API configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable holds an unusable value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    /// The HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    /// Creates an InvalidValue error
    pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            reason: reason.into(),
        }
    }
}
