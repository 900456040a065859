//! `/search/trending` response

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coins currently flagged as popular upstream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
}

/// Wrapper object around each trending entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub item: TrendingItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItem {
    pub id: String,
    pub coin_id: Option<u64>,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub slug: String,
    pub price_btc: Option<f64>,
    /// Zero-based position in the trending list
    #[serde(default)]
    pub score: u32,
    pub data: Option<TrendingItemData>,
}

/// Market figures attached to a trending entry
///
/// Upstream sends most of these as preformatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingItemData {
    pub price: Option<f64>,
    pub price_btc: Option<String>,
    #[serde(default)]
    pub price_change_percentage_24h: HashMap<String, f64>,
    pub market_cap: Option<String>,
    pub market_cap_btc: Option<String>,
    pub total_volume: Option<String>,
    pub total_volume_btc: Option<String>,
    pub sparkline: Option<String>,
    pub content: Option<serde_json::Value>,
}

impl TrendingItemData {
    /// 24h change in the given quote currency
    pub fn change_24h(&self, currency: &str) -> Option<f64> {
        self.price_change_percentage_24h.get(currency).copied()
    }
}
