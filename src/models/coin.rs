//! `/coins/{id}` detail response

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::markets::Roi;

/// Full detail page data for a single coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub web_slug: String,
    pub asset_platform_id: Option<String>,
    /// Contract address per platform; native coins carry an empty key
    #[serde(default)]
    pub platforms: HashMap<String, Option<String>>,
    #[serde(default)]
    pub detail_platforms: HashMap<String, DetailPlatform>,
    pub block_time_in_minutes: Option<u32>,
    pub hashing_algorithm: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub preview_listing: bool,
    pub public_notice: Option<String>,
    #[serde(default)]
    pub additional_notices: Vec<String>,
    #[serde(default)]
    pub localization: HashMap<String, String>,
    #[serde(default)]
    pub description: HashMap<String, String>,
    #[serde(default)]
    pub links: CoinLinks,
    pub image: Option<CoinImage>,
    #[serde(default)]
    pub country_origin: String,
    pub genesis_date: Option<NaiveDate>,
    pub sentiment_votes_up_percentage: Option<f64>,
    pub sentiment_votes_down_percentage: Option<f64>,
    pub watchlist_portfolio_users: Option<u64>,
    pub market_cap_rank: Option<u32>,
    pub market_data: Option<CoinMarketData>,
    pub community_data: Option<CommunityData>,
    pub developer_data: Option<DeveloperData>,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tickers: Vec<Ticker>,
}

impl CoinDetail {
    /// English description, empty when upstream has none
    pub fn description_en(&self) -> &str {
        self.description.get("en").map(String::as_str).unwrap_or("")
    }

    /// First non-empty homepage link
    pub fn homepage(&self) -> Option<&str> {
        self.links
            .homepage
            .iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    /// Current price in the given quote currency
    pub fn price_in(&self, currency: &str) -> Option<f64> {
        self.market_data
            .as_ref()
            .and_then(|md| md.current_price.get(currency).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailPlatform {
    pub decimal_place: Option<u32>,
    #[serde(default)]
    pub contract_address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinLinks {
    #[serde(default)]
    pub homepage: Vec<Option<String>>,
    pub whitepaper: Option<String>,
    #[serde(default)]
    pub blockchain_site: Vec<Option<String>>,
    #[serde(default)]
    pub official_forum_url: Vec<Option<String>>,
    #[serde(default)]
    pub chat_url: Vec<Option<String>>,
    #[serde(default)]
    pub announcement_url: Vec<Option<String>>,
    pub snapshot_url: Option<String>,
    pub twitter_screen_name: Option<String>,
    pub facebook_username: Option<String>,
    pub bitcointalk_thread_identifier: Option<serde_json::Value>,
    pub telegram_channel_identifier: Option<String>,
    pub subreddit_url: Option<String>,
    #[serde(default)]
    pub repos_url: RepoLinks,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepoLinks {
    #[serde(default)]
    pub github: Vec<String>,
    #[serde(default)]
    pub bitbucket: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinImage {
    pub thumb: String,
    pub small: String,
    pub large: String,
}

/// Market figures keyed by quote currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    pub total_value_locked: Option<serde_json::Value>,
    pub mcap_to_tvl_ratio: Option<f64>,
    pub fdv_to_tvl_ratio: Option<f64>,
    pub roi: Option<Roi>,
    #[serde(default)]
    pub ath: HashMap<String, f64>,
    #[serde(default)]
    pub ath_change_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub ath_date: HashMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub atl: HashMap<String, f64>,
    #[serde(default)]
    pub atl_change_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub atl_date: HashMap<String, DateTime<Utc>>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    pub market_cap_rank: Option<u32>,
    pub fully_diluted_valuation: Option<HashMap<String, f64>>,
    pub market_cap_fdv_ratio: Option<f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub high_24h: HashMap<String, f64>,
    #[serde(default)]
    pub low_24h: HashMap<String, f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d: Option<f64>,
    pub price_change_percentage_14d: Option<f64>,
    pub price_change_percentage_30d: Option<f64>,
    pub price_change_percentage_60d: Option<f64>,
    pub price_change_percentage_200d: Option<f64>,
    pub price_change_percentage_1y: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h_in_currency: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_30d_in_currency: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_1y_in_currency: HashMap<String, f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityData {
    pub facebook_likes: Option<u64>,
    pub reddit_average_posts_48h: Option<f64>,
    pub reddit_average_comments_48h: Option<f64>,
    pub reddit_subscribers: Option<u64>,
    pub reddit_accounts_active_48h: Option<u64>,
    pub telegram_channel_user_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperData {
    pub forks: Option<u64>,
    pub stars: Option<u64>,
    pub subscribers: Option<u64>,
    pub total_issues: Option<u64>,
    pub closed_issues: Option<u64>,
    pub pull_requests_merged: Option<u64>,
    pub pull_request_contributors: Option<u64>,
    pub code_additions_deletions_4_weeks: Option<CodeChanges>,
    pub commit_count_4_weeks: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeChanges {
    pub additions: Option<i64>,
    pub deletions: Option<i64>,
}

/// One exchange pair trading the coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub base: String,
    pub target: String,
    pub market: TickerMarket,
    pub last: Option<f64>,
    pub volume: Option<f64>,
    #[serde(default)]
    pub converted_last: HashMap<String, f64>,
    #[serde(default)]
    pub converted_volume: HashMap<String, f64>,
    pub trust_score: Option<String>,
    pub bid_ask_spread_percentage: Option<f64>,
    pub timestamp: Option<String>,
    pub last_traded_at: Option<String>,
    pub last_fetch_at: Option<String>,
    #[serde(default)]
    pub is_anomaly: bool,
    #[serde(default)]
    pub is_stale: bool,
    pub trade_url: Option<String>,
    pub token_info_url: Option<String>,
    pub coin_id: Option<String>,
    pub target_coin_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMarket {
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub has_trading_incentive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITCOIN_DETAIL: &str = r#"{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "web_slug": "bitcoin",
        "asset_platform_id": null,
        "platforms": {"": ""},
        "detail_platforms": {"": {"decimal_place": null, "contract_address": ""}},
        "block_time_in_minutes": 10,
        "hashing_algorithm": "SHA-256",
        "categories": ["Cryptocurrency", "Layer 1 (L1)"],
        "preview_listing": false,
        "public_notice": null,
        "additional_notices": [],
        "description": {"en": "Bitcoin is the first successful internet money."},
        "links": {
            "homepage": ["", "http://www.bitcoin.org", null],
            "whitepaper": "https://bitcoin.org/bitcoin.pdf",
            "subreddit_url": "https://www.reddit.com/r/Bitcoin/",
            "repos_url": {"github": ["https://github.com/bitcoin/bitcoin"], "bitbucket": []}
        },
        "image": {"thumb": "t.png", "small": "s.png", "large": "l.png"},
        "country_origin": "",
        "genesis_date": "2009-01-03",
        "sentiment_votes_up_percentage": 84.07,
        "sentiment_votes_down_percentage": 15.93,
        "watchlist_portfolio_users": 1541900,
        "market_cap_rank": 1,
        "market_data": {
            "current_price": {"usd": 70187.0, "eur": 64800.5},
            "total_value_locked": null,
            "mcap_to_tvl_ratio": null,
            "fdv_to_tvl_ratio": null,
            "roi": null,
            "ath": {"usd": 73738.0},
            "ath_date": {"usd": "2024-03-14T07:10:36.635Z"},
            "market_cap": {"usd": 1381651251183.0},
            "fully_diluted_valuation": {"usd": 1474623675796.0},
            "total_volume": {"usd": 20154184933.0},
            "price_change_24h": 2126.88,
            "price_change_percentage_24h": 3.12502,
            "price_change_percentage_7d": 5.4,
            "total_supply": 21000000.0,
            "max_supply": 21000000.0,
            "circulating_supply": 19675987.0,
            "last_updated": "2024-04-07T16:49:31.736Z"
        },
        "community_data": {
            "facebook_likes": null,
            "reddit_average_posts_48h": 0.0,
            "reddit_average_comments_48h": 0.0,
            "reddit_subscribers": 0,
            "reddit_accounts_active_48h": 0,
            "telegram_channel_user_count": null
        },
        "developer_data": {
            "forks": 36262,
            "stars": 73000,
            "code_additions_deletions_4_weeks": {"additions": 1570, "deletions": -1948},
            "commit_count_4_weeks": 108
        },
        "last_updated": "2024-04-07T16:49:31.736Z",
        "tickers": [{
            "base": "BTC",
            "target": "USDT",
            "market": {"name": "Binance", "identifier": "binance", "has_trading_incentive": false},
            "last": 70150.5,
            "volume": 23000.1,
            "converted_last": {"usd": 70160.0},
            "trust_score": "green",
            "bid_ask_spread_percentage": 0.010014,
            "timestamp": "2024-04-07T16:45:37+00:00",
            "is_anomaly": false,
            "is_stale": false,
            "trade_url": "https://www.binance.com/en/trade/BTC_USDT",
            "token_info_url": null,
            "coin_id": "bitcoin",
            "target_coin_id": "tether"
        }]
    }"#;

    #[test]
    fn test_decode_detail() {
        let coin: CoinDetail = serde_json::from_str(BITCOIN_DETAIL).unwrap();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.genesis_date, NaiveDate::from_ymd_opt(2009, 1, 3));
        assert_eq!(coin.price_in("eur"), Some(64800.5));
        assert_eq!(coin.homepage(), Some("http://www.bitcoin.org"));
        assert!(coin.description_en().starts_with("Bitcoin"));
        assert_eq!(coin.tickers.len(), 1);
        assert_eq!(coin.tickers[0].market.identifier, "binance");
        let dev = coin.developer_data.unwrap();
        assert_eq!(dev.code_additions_deletions_4_weeks.unwrap().deletions, Some(-1948));
    }

    #[test]
    fn test_decode_minimal_detail() {
        let coin: CoinDetail =
            serde_json::from_str(r#"{"id":"x","symbol":"x","name":"X"}"#).unwrap();
        assert!(coin.market_data.is_none());
        assert_eq!(coin.homepage(), None);
        assert_eq!(coin.description_en(), "");
        assert_eq!(coin.price_in("usd"), None);
    }
}
