//! Response shapes of the CoinGecko endpoints consumed by the dashboard
//!
//! Nullable upstream fields are `Option`s and collections default to empty,
//! so a payload that drops an optional key still decodes. Anything that does
//! not match these shapes surfaces as
//! [`ProviderError::InvalidResponse`](crate::error::ProviderError::InvalidResponse).

pub mod coin;
pub mod global;
pub mod markets;
pub mod search;
pub mod trending;

pub use coin::{CoinDetail, CoinImage, CoinLinks, CoinMarketData, Ticker};
pub use global::{GlobalMarketData, GlobalStats};
pub use markets::{MarketListing, MarketQuery, Roi};
pub use search::{SearchCategory, SearchCoin, SearchResult};
pub use trending::{TrendingCoin, TrendingItem, TrendingItemData, TrendingResponse};
