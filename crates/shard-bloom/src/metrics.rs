//! Metrics hooks for filter operations
//!
//! Provides instrumentation points for monitoring filter fill, lookup hit
//! rate and operation latencies.
//!
//! ## Usage
//!
//! ```
//! use shard_bloom::metrics::Metrics;
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_created(1, 14_377_588, 10);
//! metrics.record_lookup(Duration::from_nanos(80), true);
//! assert_eq!(metrics.snapshot().lookups_positive, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Thread-safe counters shared by reference between services.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total bits allocated across all filters and shards
    pub bits_allocated: AtomicU64,
    /// Total items added
    pub items_added: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Lookups that answered "possibly present"
    pub lookups_positive: AtomicU64,
    /// Digests rejected by the hex parser
    pub digests_rejected: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    ///
    /// # Arguments
    /// * `shard_count` - Number of shards
    /// * `bits_per_shard` - Bit length of each shard
    /// * `_hash_count` - Number of probes per item (k)
    pub fn record_filter_created(
        &self,
        shard_count: usize,
        bits_per_shard: usize,
        _hash_count: usize,
    ) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bits_allocated
            .fetch_add(shard_count as u64 * bits_per_shard as u64, Ordering::Relaxed);
    }

    /// Record an add
    pub fn record_add(&self, duration: Duration) {
        self.items_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the item was reported present (possibly false positive)
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a digest that failed to parse
    pub fn record_digest_rejected(&self) {
        self.digests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            bits_allocated: self.bits_allocated.load(Ordering::Relaxed),
            items_added: self.items_added.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            digests_rejected: self.digests_rejected.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_add_ns: self.avg_add_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average add time in nanoseconds
    pub fn avg_add_time_ns(&self) -> u64 {
        let total = self.add_time_ns.load(Ordering::Relaxed);
        let count = self.items_added.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.bits_allocated.store(0, Ordering::Relaxed);
        self.items_added.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.digests_rejected.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.add_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub bits_allocated: u64,
    pub items_added: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub digests_rejected: u64,
    pub avg_lookup_ns: u64,
    pub avg_add_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter metrics to an external system.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation
    fn record_filter_created(&self, shard_count: usize, bits_per_shard: usize, hash_count: usize);

    /// Record an add
    fn record_add(&self, duration: Duration);

    /// Record lookup operation
    fn record_lookup(&self, duration: Duration, found: bool);

    /// Record a rejected digest
    fn record_digest_rejected(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize, _: usize) {}
    fn record_add(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_digest_rejected(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, shard_count: usize, bits_per_shard: usize, hash_count: usize) {
        Metrics::record_filter_created(self, shard_count, bits_per_shard, hash_count);
    }

    fn record_add(&self, duration: Duration) {
        Metrics::record_add(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_digest_rejected(&self) {
        Metrics::record_digest_rejected(self);
    }
}
