//! CoinGecko REST client

use crate::{
    config::ApiConfig,
    constants::{
        API_KEY_ENV, API_KEY_HEADER, COIN_ENDPOINT_PREFIX, GLOBAL_ENDPOINT, MARKETS_ENDPOINT,
        SEARCH_ENDPOINT, TRENDING_ENDPOINT, USER_AGENT,
    },
    error::{ConfigError, ProviderError},
    models::{CoinDetail, GlobalStats, MarketListing, MarketQuery, SearchResult, TrendingResponse},
    provider::MarketDataSource,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// CoinGecko API client
///
/// Every request carries the demo API key header and a JSON content type.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// Creates a new client from explicit configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ConfigError::invalid(API_KEY_ENV, e.to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            "Created CoinGecko client"
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates a new client from environment configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ApiConfig::from_env()?)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues a GET request and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self.endpoint_url(path);
        tracing::debug!(url = %url, params = ?params, "Requesting CoinGecko endpoint");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RateLimitExceeded {
                message: extract_error_message(&body),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), extract_error_message(&body)));
        }

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!(
                "Failed to parse CoinGecko {} response: {}",
                path, e
            ))
        })?;

        tracing::debug!(path, bytes = body.len(), "Decoded CoinGecko response");
        Ok(decoded)
    }
}

/// Pulls a human-readable message out of an upstream error body
///
/// CoinGecko answers with `{"error": "..."}` or
/// `{"status": {"error_message": "..."}}`; proxies in front of it commonly
/// use `{"message": "..."}`, which takes precedence.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let message = [
        value.get("message"),
        value.get("status").and_then(|s| s.get("error_message")),
        value.get("error"),
    ]
    .into_iter()
    .flatten()
    .filter_map(|v| v.as_str())
    .map(str::trim)
    .find(|m| !m.is_empty())
    .map(str::to_string);
    message
}

/// Rejects ids that would address a different endpoint
pub(crate) fn validate_coin_id(id: &str) -> Result<&str, ProviderError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ProviderError::invalid_request("coin id is empty"));
    }
    if id
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace())
    {
        return Err(ProviderError::invalid_request(format!(
            "coin id {:?} contains reserved characters",
            id
        )));
    }
    Ok(id)
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<MarketListing>, ProviderError> {
        self.get_json(MARKETS_ENDPOINT, &query.to_params()).await
    }

    async fn trending(&self) -> Result<TrendingResponse, ProviderError> {
        self.get_json(TRENDING_ENDPOINT, &[]).await
    }

    async fn global_stats(&self) -> Result<GlobalStats, ProviderError> {
        self.get_json(GLOBAL_ENDPOINT, &[]).await
    }

    async fn coin(&self, id: &str) -> Result<CoinDetail, ProviderError> {
        let id = validate_coin_id(id)?;
        let path = format!("{}/{}", COIN_ENDPOINT_PREFIX, id);
        self.get_json(&path, &[]).await
    }

    async fn search(&self, query: &str) -> Result<SearchResult, ProviderError> {
        self.get_json(SEARCH_ENDPOINT, &[("query", query.to_string())]).await
    }

    fn source_name(&self) -> &'static str {
        "coingecko"
    }
}
