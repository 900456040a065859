//! Shared types for the dashboard store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of data the store can refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// Ranked market listing
    Markets,
    /// Trending coins
    Trending,
    /// Global market statistics
    Global,
    /// Single coin detail page
    CoinDetail,
    /// Free-text search
    Search,
}

impl FetchKind {
    /// Get the kind's name as used in logs and health details
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Markets => "markets",
            FetchKind::Trending => "trending",
            FetchKind::Global => "global",
            FetchKind::CoinDetail => "coin_detail",
            FetchKind::Search => "search",
        }
    }

    /// Get all fetch kinds
    pub fn all() -> &'static [FetchKind] {
        &[
            FetchKind::Markets,
            FetchKind::Trending,
            FetchKind::Global,
            FetchKind::CoinDetail,
            FetchKind::Search,
        ]
    }
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress and error flags of a tracked request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestState {
    /// True while a tracked call is running
    pub in_progress: bool,
    /// Display message of the last failed call
    pub last_error: Option<String>,
}

impl RequestState {
    pub(crate) fn loading() -> Self {
        Self {
            in_progress: true,
            last_error: None,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            in_progress: false,
            last_error: Some(message),
        }
    }
}

/// Store events for the unified event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreEvent {
    /// A fetch replaced the stored data
    Refreshed {
        id: Uuid,
        kind: FetchKind,
        /// Number of top-level entries in the new payload
        items: usize,
        timestamp: DateTime<Utc>,
    },

    /// A fetch failed and the stored data was kept
    FetchFailed {
        id: Uuid,
        kind: FetchKind,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl StoreEvent {
    pub(crate) fn refreshed(kind: FetchKind, items: usize) -> Self {
        StoreEvent::Refreshed {
            id: Uuid::new_v4(),
            kind,
            items,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn fetch_failed(kind: FetchKind, error_message: String) -> Self {
        StoreEvent::FetchFailed {
            id: Uuid::new_v4(),
            kind,
            error_message,
            timestamp: Utc::now(),
        }
    }

    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            StoreEvent::Refreshed { id, .. } => *id,
            StoreEvent::FetchFailed { id, .. } => *id,
        }
    }

    /// Get the fetch kind the event refers to
    pub fn kind(&self) -> FetchKind {
        match self {
            StoreEvent::Refreshed { kind, .. } => *kind,
            StoreEvent::FetchFailed { kind, .. } => *kind,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::Refreshed { .. } => "REFRESHED",
            StoreEvent::FetchFailed { .. } => "FETCH_FAILED",
        }
    }
}

impl std::fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreEvent::Refreshed { kind, items, .. } => {
                write!(f, "Refreshed {}: {} items", kind, items)
            }
            StoreEvent::FetchFailed {
                kind,
                error_message,
                ..
            } => write!(f, "Fetch failed for {}: {}", kind, error_message),
        }
    }
}

/// Overall store health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Every fetch kind is free of errors
    Healthy,
    /// Some fetches failed but data is still being shown
    Degraded,
    /// The market listing failed and there is nothing to show
    Unhealthy,
}

/// Component health information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional status message
    pub message: Option<String>,
    /// Component-specific details
    pub details: std::collections::HashMap<String, serde_json::Value>,
    /// Last checked timestamp
    pub last_checked: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent::fetch_failed(FetchKind::CoinDetail, "boom".to_string());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "FETCH_FAILED");
        assert_eq!(json["kind"], "coin_detail");
        assert_eq!(event.event_type(), "FETCH_FAILED");
        assert_eq!(event.to_string(), "Fetch failed for coin_detail: boom");
    }

    #[test]
    fn test_default_request_state() {
        let state = RequestState::default();
        assert!(!state.in_progress);
        assert!(state.last_error.is_none());
    }
}
