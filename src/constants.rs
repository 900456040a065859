//! Constants for the market dashboard SDK
//!
//! Compile-time defaults live here. The only runtime configuration is the
//! API key, base URL and timeout read by [`crate::config::ApiConfig`].

/// Default CoinGecko API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the CoinGecko demo API key
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// HTTP request timeout (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "market-dashboard-sdk/0.1.0";

/// Market listing endpoint
pub const MARKETS_ENDPOINT: &str = "/coins/markets";

/// Trending coins endpoint
pub const TRENDING_ENDPOINT: &str = "/search/trending";

/// Global market statistics endpoint
pub const GLOBAL_ENDPOINT: &str = "/global";

/// Prefix of the coin detail endpoint (`/coins/{id}`)
pub const COIN_ENDPOINT_PREFIX: &str = "/coins";

/// Search endpoint
pub const SEARCH_ENDPOINT: &str = "/search";

/// Default quote currency for market listings
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Default ordering for market listings
pub const DEFAULT_MARKET_ORDER: &str = "market_cap_desc";

/// Number of listings shown when the full list is collapsed
pub const TOP_LISTING_LIMIT: usize = 15;

/// Message recorded when a failure carries nothing displayable
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error occurred";

/// Capacity of the store event broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Maximum number of latency samples kept per fetch kind
pub const MAX_METRIC_SAMPLES: usize = 100;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// Environment variable overriding the API base URL
pub const API_BASE_URL_ENV: &str = "COINGECKO_API_BASE_URL";

/// Environment variable overriding the request timeout
pub const REQUEST_TIMEOUT_ENV: &str = "COINGECKO_REQUEST_TIMEOUT_SECS";
