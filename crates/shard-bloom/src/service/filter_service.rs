//! Filter Service
//!
//! Owns one `BloomFilter`, times every operation for a `MetricsRecorder`
//! and logs rejected digests.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::{BloomFilter, FilterConfig};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::MembershipApi;

/// Filter Service implementation
///
/// Implements the `MembershipApi` port over an owned filter.
pub struct FilterService<M: MetricsRecorder = NoOpMetrics> {
    filter: BloomFilter,
    metrics: Arc<M>,
}

impl FilterService<NoOpMetrics> {
    /// Create a service without metrics
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }
}

impl<M: MetricsRecorder> FilterService<M> {
    /// Create a service reporting to `metrics`
    pub fn with_metrics(config: &FilterConfig, metrics: Arc<M>) -> Result<Self, FilterError> {
        let filter = BloomFilter::from_config(config)?;
        metrics.record_filter_created(
            filter.shard_count(),
            filter.bits_per_shard(),
            filter.hash_function_count(),
        );
        Ok(Self { filter, metrics })
    }

    /// Read-only access to the underlying filter
    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    /// Add a batch of items
    pub fn add_all<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.add(item.as_ref());
        }
    }

    fn reject_digest(&self, digest: &str, err: FilterError) -> FilterError {
        self.metrics.record_digest_rejected();
        warn!(digest_len = digest.len(), error = %err, "Rejected malformed digest");
        err
    }
}

impl<M: MetricsRecorder> MembershipApi for FilterService<M> {
    fn add(&mut self, item: &str) {
        let start = Instant::now();
        self.filter.add(item);
        self.metrics.record_add(start.elapsed());
    }

    fn add_digest(&mut self, digest: &str) -> Result<(), FilterError> {
        let start = Instant::now();
        match self.filter.add_digest(digest) {
            Ok(()) => {
                self.metrics.record_add(start.elapsed());
                Ok(())
            }
            Err(err) => Err(self.reject_digest(digest, err.into())),
        }
    }

    fn contains(&self, item: &str) -> bool {
        let start = Instant::now();
        let found = self.filter.contains(item);
        self.metrics.record_lookup(start.elapsed(), found);
        found
    }

    fn contains_digest(&self, digest: &str) -> Result<bool, FilterError> {
        let start = Instant::now();
        match self.filter.contains_digest(digest) {
            Ok(found) => {
                self.metrics.record_lookup(start.elapsed(), found);
                if found {
                    debug!(prefix = digest.get(..5).unwrap_or_default(), "Digest possibly seen");
                }
                Ok(found)
            }
            Err(err) => Err(self.reject_digest(digest, err.into())),
        }
    }

    fn fill_ratio(&self) -> f64 {
        self.filter.truthiness()
    }
}
