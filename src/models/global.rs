//! `/global` response

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub data: GlobalMarketData,
}

/// Aggregate market figures across all tracked coins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarketData {
    #[serde(default)]
    pub active_cryptocurrencies: u64,
    #[serde(default)]
    pub upcoming_icos: u64,
    #[serde(default)]
    pub ongoing_icos: u64,
    #[serde(default)]
    pub ended_icos: u64,
    #[serde(default)]
    pub markets: u64,
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    /// Dominance percentage keyed by coin symbol
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    /// Unix timestamp in seconds
    pub updated_at: Option<i64>,
}

impl GlobalMarketData {
    pub fn total_market_cap_in(&self, currency: &str) -> Option<f64> {
        self.total_market_cap.get(currency).copied()
    }

    pub fn total_volume_in(&self, currency: &str) -> Option<f64> {
        self.total_volume.get(currency).copied()
    }

    pub fn dominance(&self, symbol: &str) -> Option<f64> {
        self.market_cap_percentage.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_global() {
        let json = r#"{"data":{
            "active_cryptocurrencies": 14000,
            "upcoming_icos": 0,
            "ongoing_icos": 49,
            "ended_icos": 3376,
            "markets": 1100,
            "total_market_cap": {"usd": 2.6e12, "btc": 38000000.0},
            "total_volume": {"usd": 9.1e10},
            "market_cap_percentage": {"btc": 52.1, "eth": 16.8},
            "market_cap_change_percentage_24h_usd": -1.25,
            "updated_at": 1712500000
        }}"#;

        let global: GlobalStats = serde_json::from_str(json).unwrap();
        assert_eq!(global.data.active_cryptocurrencies, 14000);
        assert_eq!(global.data.total_market_cap_in("usd"), Some(2.6e12));
        assert_eq!(global.data.dominance("eth"), Some(16.8));
        assert_eq!(global.data.total_volume_in("eur"), None);
    }

    #[test]
    fn test_missing_data_is_rejected() {
        assert!(serde_json::from_str::<GlobalStats>(r#"{"status":"ok"}"#).is_err());
    }
}
