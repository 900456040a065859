//! `/coins/markets` listing and its query parameters

use crate::constants::{DEFAULT_MARKET_ORDER, DEFAULT_VS_CURRENCY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked coin with current market figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub fully_diluted_valuation: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<DateTime<Utc>>,
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<DateTime<Utc>>,
    pub roi: Option<Roi>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Return on investment since launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roi {
    pub times: f64,
    pub currency: String,
    pub percentage: f64,
}

/// Query parameters for the market listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    /// Quote currency, e.g. `usd`
    pub vs_currency: String,
    /// Upstream ordering, e.g. `market_cap_desc`
    pub order: String,
    /// Page size (upstream default applies when unset)
    pub per_page: Option<u32>,
    /// 1-based page number
    pub page: Option<u32>,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            order: DEFAULT_MARKET_ORDER.to_string(),
            per_page: None,
            page: None,
        }
    }
}

impl MarketQuery {
    /// Query for a different quote currency with the default ordering
    pub fn in_currency(vs_currency: impl Into<String>) -> Self {
        Self {
            vs_currency: vs_currency.into(),
            ..Self::default()
        }
    }

    /// Sets the page size and page number
    pub fn paged(mut self, per_page: u32, page: u32) -> Self {
        self.per_page = Some(per_page);
        self.page = Some(page);
        self
    }

    /// Query string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", self.order.clone()),
        ];
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}
