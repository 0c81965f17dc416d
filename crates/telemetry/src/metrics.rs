//! In-process run metrics.
//!
//! Counters and stage latency histograms accumulated during a run. A
//! snapshot is logged when the run finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latency accumulator: observation count and total milliseconds.
#[derive(Debug)]
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }
}

/// Collected metrics for the ETL.
#[derive(Debug, Default)]
pub struct Metrics {
    // Extraction
    pub lines_read: Counter,
    pub records_malformed: Counter,
    pub records_rejected: Counter,
    pub records_extracted: Counter,

    // Transformation
    pub events_cleaned: Counter,

    // Load
    pub activity_rows_written: Counter,
    pub agg_rows_written: Counter,

    // Stage latency
    pub extract_latency_ms: Histogram,
    pub transform_latency_ms: Histogram,
    pub load_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub lines_read: u64,
    pub records_malformed: u64,
    pub records_rejected: u64,
    pub records_extracted: u64,
    pub events_cleaned: u64,
    pub activity_rows_written: u64,
    pub agg_rows_written: u64,
    pub extract_latency_mean_ms: f64,
    pub transform_latency_mean_ms: f64,
    pub load_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            lines_read: self.lines_read.get(),
            records_malformed: self.records_malformed.get(),
            records_rejected: self.records_rejected.get(),
            records_extracted: self.records_extracted.get(),
            events_cleaned: self.events_cleaned.get(),
            activity_rows_written: self.activity_rows_written.get(),
            agg_rows_written: self.agg_rows_written.get(),
            extract_latency_mean_ms: self.extract_latency_ms.mean(),
            transform_latency_mean_ms: self.transform_latency_ms.mean(),
            load_latency_mean_ms: self.load_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
