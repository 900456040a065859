//! # Market Dashboard SDK
//!
//! Data layer for a cryptocurrency market dashboard backed by the CoinGecko
//! API: market listing, trending coins, global stats, coin detail and search.
//!
//! ## Usage
//!
//! ```no_run
//! use market_dashboard_sdk::{FetchKind, MarketStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads COINGECKO_API_KEY (and optional overrides) from the environment
//! let store = MarketStore::global().await?;
//!
//! if store.fetch_markets().await.is_err() {
//!     // The message is also kept for the view to render
//!     let state = store.request_state(FetchKind::Markets);
//!     eprintln!("{}", state.last_error.unwrap_or_default());
//! }
//!
//! for coin in store.displayed().await {
//!     let price = market_dashboard_sdk::format::format_price(coin.current_price);
//!     println!("{}: {}", coin.name, price);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! MarketStore (one RequestTracker per FetchKind)
//!     ↓
//! MarketDataSource (CoinGeckoClient)
//!     ↓
//! CoinGecko REST API
//! ```
//!
//! A failed fetch keeps the previously stored payload, records a display
//! message on the tracker of its kind and returns the original error.

pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod providers;
pub mod store;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ConfigError, ProviderError};
pub use metrics::FetchMetrics;
pub use models::{
    CoinDetail, GlobalStats, MarketListing, MarketQuery, SearchResult, TrendingResponse,
};
pub use provider::MarketDataSource;
pub use providers::CoinGeckoClient;
pub use store::MarketStore;
pub use tracker::{ErrorMessage, RequestTracker};
pub use types::{ComponentHealth, FetchKind, HealthStatus, RequestState, StoreEvent};
