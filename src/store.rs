//! Dashboard store
//!
//! Holds the last successfully fetched payload of every fetch kind together
//! with one [`RequestTracker`] per kind, so loading and error flags of
//! unrelated fetches never interfere.

use crate::{
    constants::{EVENT_CHANNEL_CAPACITY, TOP_LISTING_LIMIT},
    error::{ConfigError, ProviderError},
    metrics::{FetchMetrics, MetricsCollector},
    models::{CoinDetail, GlobalStats, MarketListing, MarketQuery, SearchResult, TrendingResponse},
    provider::MarketDataSource,
    providers::CoinGeckoClient,
    tracker::{describe_error, RequestTracker},
    types::{ComponentHealth, FetchKind, HealthStatus, RequestState, StoreEvent},
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{broadcast, watch, OnceCell, RwLock};

static GLOBAL_STORE: OnceCell<Arc<MarketStore>> = OnceCell::const_new();

/// One tracker per fetch kind
#[derive(Debug, Default)]
struct Trackers {
    markets: RequestTracker,
    trending: RequestTracker,
    global: RequestTracker,
    coin_detail: RequestTracker,
    search: RequestTracker,
}

impl Trackers {
    fn get(&self, kind: FetchKind) -> &RequestTracker {
        match kind {
            FetchKind::Markets => &self.markets,
            FetchKind::Trending => &self.trending,
            FetchKind::Global => &self.global,
            FetchKind::CoinDetail => &self.coin_detail,
            FetchKind::Search => &self.search,
        }
    }
}

/// Owner of all fetched dashboard data
///
/// Every action performs one data source call through the tracker of its
/// kind and replaces the stored payload only on success; a failed refresh
/// keeps the previous payload visible.
///
/// # Example
/// ```no_run
/// use market_dashboard_sdk::MarketStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MarketStore::global().await?;
/// store.fetch_markets().await?;
/// for coin in store.displayed().await {
///     println!("{}: {:?}", coin.name, coin.current_price);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketStore {
    source: Arc<dyn MarketDataSource>,
    markets: RwLock<Vec<MarketListing>>,
    trending: RwLock<Option<TrendingResponse>>,
    global: RwLock<Option<GlobalStats>>,
    coin_detail: RwLock<Option<CoinDetail>>,
    search_results: RwLock<Option<SearchResult>>,
    show_all: AtomicBool,
    trackers: Trackers,
    metrics: MetricsCollector,
    events: broadcast::Sender<StoreEvent>,
}

impl MarketStore {
    /// Returns the global store backed by the CoinGecko client
    ///
    /// The first successful call builds the client from environment
    /// configuration; configuration errors are returned and not cached.
    pub async fn global() -> Result<Arc<Self>, ConfigError> {
        GLOBAL_STORE
            .get_or_try_init(|| async { Self::from_env().map(Arc::new) })
            .await
            .cloned()
    }

    /// Creates a store backed by a CoinGecko client configured from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(CoinGeckoClient::from_env()?)))
    }

    /// Creates a store over a custom data source
    ///
    /// This is primarily for testing with mock sources.
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            markets: RwLock::new(Vec::new()),
            trending: RwLock::new(None),
            global: RwLock::new(None),
            coin_detail: RwLock::new(None),
            search_results: RwLock::new(None),
            show_all: AtomicBool::new(false),
            trackers: Trackers::default(),
            metrics: MetricsCollector::new(),
            events,
        }
    }

    /// Runs one tracked fetch and stores its payload with `assign`
    ///
    /// The payload is dropped when a newer fetch of the same kind started
    /// while this one was in flight. Ownership is checked again once the
    /// field lock is held, so an older fetch can never overwrite a newer one.
    /// `assign` returns the item count published with the refresh event.
    async fn refresh<S, T, F, Fut, A>(
        &self,
        kind: FetchKind,
        slot: &RwLock<S>,
        fetch: F,
        assign: A,
    ) -> Result<(), ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
        A: FnOnce(&mut S, T) -> usize,
    {
        let tracker = self.trackers.get(kind);
        let start = Instant::now();
        let tracked = tracker.track(fetch).await;
        let elapsed = start.elapsed();
        self.metrics
            .record(kind, elapsed, tracked.outcome.is_ok())
            .await;

        match tracked.outcome {
            Ok(payload) => {
                let mut field = slot.write().await;
                if !tracker.is_current(tracked.ticket) {
                    tracing::debug!(kind = %kind, "Discarding payload of superseded fetch");
                    return Ok(());
                }
                let items = assign(&mut *field, payload);
                drop(field);

                tracing::debug!(
                    kind = %kind,
                    source = self.source.source_name(),
                    items,
                    latency_ms = elapsed.as_millis() as u64,
                    "Fetch succeeded"
                );
                self.publish_refreshed(kind, items);
                Ok(())
            }
            Err(e) => {
                let message = describe_error(&e);
                tracing::warn!(
                    kind = %kind,
                    source = self.source.source_name(),
                    error = %message,
                    "Fetch failed, keeping previous data"
                );
                let _ = self.events.send(StoreEvent::fetch_failed(kind, message));
                Err(e)
            }
        }
    }

    fn publish_refreshed(&self, kind: FetchKind, items: usize) {
        let _ = self.events.send(StoreEvent::refreshed(kind, items));
    }

    /// Refreshes the market listing with the default query (`usd`, `market_cap_desc`)
    pub async fn fetch_markets(&self) -> Result<(), ProviderError> {
        self.fetch_markets_with(MarketQuery::default()).await
    }

    /// Refreshes the market listing with a custom query
    pub async fn fetch_markets_with(&self, query: MarketQuery) -> Result<(), ProviderError> {
        self.refresh(
            FetchKind::Markets,
            &self.markets,
            || self.source.list_markets(&query),
            |field, listings| {
                let count = listings.len();
                *field = listings;
                count
            },
        )
        .await
    }

    /// Refreshes the trending coins
    pub async fn fetch_trending(&self) -> Result<(), ProviderError> {
        self.refresh(
            FetchKind::Trending,
            &self.trending,
            || self.source.trending(),
            |field, trending| {
                let count = trending.coins.len();
                *field = Some(trending);
                count
            },
        )
        .await
    }

    /// Refreshes the global market statistics
    pub async fn fetch_global(&self) -> Result<(), ProviderError> {
        self.refresh(
            FetchKind::Global,
            &self.global,
            || self.source.global_stats(),
            |field, stats| {
                *field = Some(stats);
                1
            },
        )
        .await
    }

    /// Loads the detail page data of one coin
    ///
    /// # Arguments
    /// * `id` - Upstream coin id, e.g. `bitcoin`
    pub async fn fetch_coin(&self, id: &str) -> Result<(), ProviderError> {
        self.refresh(
            FetchKind::CoinDetail,
            &self.coin_detail,
            || self.source.coin(id),
            |field, detail| {
                *field = Some(detail);
                1
            },
        )
        .await
    }

    /// Runs a free-text search
    pub async fn search(&self, query: &str) -> Result<(), ProviderError> {
        self.refresh(
            FetchKind::Search,
            &self.search_results,
            || self.source.search(query),
            |field, results| {
                let count = results.coins.len();
                *field = Some(results);
                count
            },
        )
        .await
    }

    /// Refreshes the listing, trending coins and global stats concurrently
    ///
    /// All three fetches run to completion; the first error in that order is
    /// returned.
    pub async fn refresh_dashboard(&self) -> Result<(), ProviderError> {
        let (markets, trending, global) = futures::join!(
            self.fetch_markets(),
            self.fetch_trending(),
            self.fetch_global()
        );
        markets.and(trending).and(global)
    }

    /// Gets the full market listing in upstream order
    pub async fn markets(&self) -> Vec<MarketListing> {
        self.markets.read().await.clone()
    }

    /// Gets the first 15 listings in upstream order
    pub async fn top15(&self) -> Vec<MarketListing> {
        self.markets
            .read()
            .await
            .iter()
            .take(TOP_LISTING_LIMIT)
            .cloned()
            .collect()
    }

    /// Gets the listings the dashboard should render
    ///
    /// The full listing when "show all" is on, otherwise [`top15`](Self::top15).
    pub async fn displayed(&self) -> Vec<MarketListing> {
        if self.show_all() {
            self.markets().await
        } else {
            self.top15().await
        }
    }

    /// Whether the full listing is shown
    pub fn show_all(&self) -> bool {
        self.show_all.load(Ordering::Acquire)
    }

    /// Flips the "show all" preference and returns the new value
    pub fn toggle_show_all(&self) -> bool {
        !self.show_all.fetch_xor(true, Ordering::AcqRel)
    }

    pub async fn trending(&self) -> Option<TrendingResponse> {
        self.trending.read().await.clone()
    }

    pub async fn global_stats(&self) -> Option<GlobalStats> {
        self.global.read().await.clone()
    }

    pub async fn coin_detail(&self) -> Option<CoinDetail> {
        self.coin_detail.read().await.clone()
    }

    pub async fn search_results(&self) -> Option<SearchResult> {
        self.search_results.read().await.clone()
    }

    /// Gets the progress and error flags of one fetch kind
    pub fn request_state(&self, kind: FetchKind) -> RequestState {
        self.trackers.get(kind).state()
    }

    /// Subscribes to the progress and error flags of one fetch kind
    pub fn subscribe_state(&self, kind: FetchKind) -> watch::Receiver<RequestState> {
        self.trackers.get(kind).subscribe()
    }

    /// True while any fetch is in flight
    pub fn is_loading(&self) -> bool {
        FetchKind::all()
            .iter()
            .any(|kind| self.trackers.get(*kind).in_progress())
    }

    /// Clears the flags of one fetch kind
    pub fn reset(&self, kind: FetchKind) {
        self.trackers.get(kind).reset();
    }

    /// Clears the flags of every fetch kind
    pub fn reset_all(&self) {
        for kind in FetchKind::all() {
            self.reset(*kind);
        }
    }

    /// Subscribes to refresh and failure events
    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Gets latency and success metrics for one fetch kind
    pub async fn fetch_metrics(&self, kind: FetchKind) -> FetchMetrics {
        self.metrics.snapshot(kind).await
    }

    /// Returns the name of the underlying data source
    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    /// Perform a health check on the store
    ///
    /// # Returns
    /// Unhealthy when there is no listing to show, Degraded when any fetch
    /// kind holds an error, Healthy otherwise
    pub async fn health_check(&self) -> ComponentHealth {
        let mut details = HashMap::new();

        let listing_count = self.markets.read().await.len();
        details.insert(
            "market_listings".to_string(),
            serde_json::json!(listing_count),
        );
        details.insert(
            "source_name".to_string(),
            serde_json::json!(self.source_name()),
        );

        let errors: HashMap<&'static str, String> = FetchKind::all()
            .iter()
            .filter_map(|kind| {
                self.request_state(*kind)
                    .last_error
                    .map(|error| (kind.as_str(), error))
            })
            .collect();
        details.insert("errors".to_string(), serde_json::json!(errors));

        let loading: Vec<&'static str> = FetchKind::all()
            .iter()
            .filter(|kind| self.trackers.get(**kind).in_progress())
            .map(|kind| kind.as_str())
            .collect();
        details.insert("loading".to_string(), serde_json::json!(loading));

        let status = if listing_count == 0 {
            HealthStatus::Unhealthy
        } else if !errors.is_empty() {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        let message = match status {
            HealthStatus::Healthy => format!("Market store holds {} listings", listing_count),
            HealthStatus::Degraded => format!("Market store has {} failed fetches", errors.len()),
            HealthStatus::Unhealthy => "Market store has no listing to show".to_string(),
        };

        ComponentHealth {
            name: "market_store".to_string(),
            status,
            message: Some(message),
            details,
            last_checked: chrono::Utc::now(),
        }
    }
}
