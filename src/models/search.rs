//! `/search` response

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
    #[serde(default)]
    pub exchanges: Vec<SearchExchange>,
    #[serde(default)]
    pub icos: Vec<SearchIco>,
    #[serde(default)]
    pub categories: Vec<SearchCategory>,
    #[serde(default)]
    pub nfts: Vec<SearchNft>,
}

impl SearchResult {
    /// True when no section matched
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
            && self.exchanges.is_empty()
            && self.icos.is_empty()
            && self.categories.is_empty()
            && self.nfts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchExchange {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub market_type: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIco {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCategory {
    pub id: CategoryId,
    pub name: String,
}

/// Category identifiers arrive either numeric or as slugs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Numeric(u64),
    Slug(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchNft {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub thumb: String,
}
