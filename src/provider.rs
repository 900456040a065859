//! Data source abstraction for the market API

use crate::{
    error::ProviderError,
    models::{CoinDetail, GlobalStats, MarketListing, MarketQuery, SearchResult, TrendingResponse},
};
use async_trait::async_trait;

/// Trait for market data sources
///
/// Each method performs exactly one upstream request and returns the decoded
/// payload unmodified.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the ranked market listing
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<MarketListing>, ProviderError>;

    /// Fetches the coins currently trending upstream
    async fn trending(&self) -> Result<TrendingResponse, ProviderError>;

    /// Fetches global market statistics
    async fn global_stats(&self) -> Result<GlobalStats, ProviderError>;

    /// Fetches the detail page data for one coin
    ///
    /// # Arguments
    /// * `id` - Upstream coin id, e.g. `bitcoin`
    async fn coin(&self, id: &str) -> Result<CoinDetail, ProviderError>;

    /// Searches coins, exchanges, categories and NFTs
    async fn search(&self, query: &str) -> Result<SearchResult, ProviderError>;

    /// Returns the name of this source
    fn source_name(&self) -> &'static str;
}
