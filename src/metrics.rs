//! Per-kind fetch metrics
//!
//! Tracks latency percentiles and success rates for each fetch kind.

use crate::{constants::MAX_METRIC_SAMPLES, types::FetchKind};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;

/// Metrics for a single fetch kind
#[derive(Debug, Clone, PartialEq)]
pub struct FetchMetrics {
    pub kind: FetchKind,
    /// 50th percentile latency of successful fetches in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful fetches in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0)
    pub success_rate: f64,
    pub total_requests: u64,
    pub failed_requests: u64,
}

impl FetchMetrics {
    /// Creates metrics with no data
    pub fn empty(kind: FetchKind) -> Self {
        Self {
            kind,
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_requests: 0,
            failed_requests: 0,
        }
    }
}

#[derive(Debug, Default)]
struct MetricsWindow {
    /// Rolling window of (latency ms, success)
    samples: VecDeque<(f64, bool)>,
    total: u64,
    failed: u64,
}

/// Collects fetch outcomes keyed by kind
#[derive(Debug, Default)]
pub struct MetricsCollector {
    windows: RwLock<HashMap<FetchKind, MetricsWindow>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one fetch with its duration and outcome
    pub async fn record(&self, kind: FetchKind, duration: Duration, success: bool) {
        let mut windows = self.windows.write().await;
        let window = windows.entry(kind).or_default();

        window.total += 1;
        if !success {
            window.failed += 1;
        }
        if window.samples.len() >= MAX_METRIC_SAMPLES {
            window.samples.pop_front();
        }
        window
            .samples
            .push_back((duration.as_secs_f64() * 1000.0, success));
    }

    /// Computes current metrics for a kind
    pub async fn snapshot(&self, kind: FetchKind) -> FetchMetrics {
        let windows = self.windows.read().await;
        let Some(window) = windows.get(&kind) else {
            return FetchMetrics::empty(kind);
        };

        let mut latencies: Vec<f64> = window
            .samples
            .iter()
            .filter(|(_, success)| *success)
            .map(|(ms, _)| *ms)
            .collect();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let success_rate = if window.total > 0 {
            (window.total - window.failed) as f64 / window.total as f64
        } else {
            1.0
        };

        FetchMetrics {
            kind,
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate,
            total_requests: window.total,
            failed_requests: window.failed,
        }
    }
}

/// Nearest-rank percentile of sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}
