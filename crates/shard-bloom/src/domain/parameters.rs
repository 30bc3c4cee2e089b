//! Bloom filter sizing and sharding
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k     -- expected false positive rate
//!
//! A single shard is addressed with 32-bit signed indices. When the optimal
//! m does not fit, the capacity is split across 16 and then 256 shards, each
//! sized as an independent filter for its share of the items.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FilterError;

/// Largest bit count one shard can address
pub const MAX_SHARD_BITS: usize = i32::MAX as usize;

/// Shard count multiplier applied on each split
pub const SHARD_SPLIT_FACTOR: usize = 16;

/// Shard count ceiling
pub const MAX_SHARDS: usize = 256;

/// FPR per bit-per-item at optimal k: fpr ≈ 0.6185^(m/n)
const OPTIMAL_FPR_BASE: f64 = 0.6185;

/// Default rate for a one-item filter, where 1/capacity would be 1
const SINGLE_ITEM_ERROR_RATE: f64 = 0.5;

/// Derived filter geometry, immutable once computed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Requested capacity across all shards
    pub capacity: i64,
    /// Configured (or derived) error rate
    pub error_rate: f64,
    /// Number of shards: 1, 16 or 256
    pub shard_count: usize,
    /// Length of each shard's bit array
    pub bits_per_shard: usize,
    /// Number of probes per item (k)
    pub hash_function_count: usize,
    /// floor(capacity / shard_count)
    pub shard_capacity: i64,
}

impl Geometry {
    /// Size a filter for `capacity` items at `error_rate`
    ///
    /// With no error rate, one is derived from the capacity
    /// (see [`default_error_rate`]).
    pub fn compute(capacity: i64, error_rate: Option<f64>) -> Result<Self, FilterError> {
        check_capacity(capacity)?;
        let error_rate = error_rate.unwrap_or_else(|| default_error_rate(capacity));
        check_error_rate(error_rate)?;

        let (shard_count, bits_per_shard) = split_into_shards(capacity, error_rate)
            .ok_or(FilterError::CapacityTooLarge {
                capacity,
                error_rate,
            })?;

        let shard_capacity = capacity / shard_count as i64;
        let hash_function_count =
            optimal_k(bits_per_shard, shard_capacity.max(1) as usize).max(1);

        debug!(
            capacity,
            error_rate,
            shard_count,
            bits_per_shard,
            hash_function_count,
            "Computed filter geometry"
        );

        Ok(Self {
            capacity,
            error_rate,
            shard_count,
            bits_per_shard,
            hash_function_count,
            shard_capacity,
        })
    }

    /// Total bits across all shards
    pub fn total_bits(&self) -> u64 {
        self.shard_count as u64 * self.bits_per_shard as u64
    }

    /// Expected false positive rate once `items` have been spread over the shards
    pub fn estimated_fpr(&self, items: u64) -> f64 {
        let per_shard = (items / self.shard_count as u64) as usize;
        calculate_fpr(self.bits_per_shard, per_shard, self.hash_function_count)
    }
}

/// Capacity must be at least one item
pub fn check_capacity(capacity: i64) -> Result<(), FilterError> {
    if capacity < 1 {
        return Err(FilterError::CapacityOutOfRange { capacity });
    }
    Ok(())
}

/// Error rate must lie strictly between 0 and 1 (NaN is rejected)
pub fn check_error_rate(error_rate: f64) -> Result<(), FilterError> {
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(FilterError::ErrorRateOutOfRange { error_rate });
    }
    Ok(())
}

/// Error rate used when the caller does not supply one
///
/// `1 / capacity`, unless that underflows to zero; then the asymptotic
/// `0.6185 ^ (max_bits / capacity)`. The result is not checked against the
/// largest geometry, so sizing may still fail with `CapacityTooLarge`.
pub fn default_error_rate(capacity: i64) -> f64 {
    if capacity <= 1 {
        return SINGLE_ITEM_ERROR_RATE;
    }

    let items = capacity as f64;
    let reciprocal = 1.0 / items;
    if reciprocal > 0.0 {
        return reciprocal;
    }

    let max_total_bits = MAX_SHARD_BITS as f64 * MAX_SHARDS as f64;
    let error_rate = OPTIMAL_FPR_BASE.powf(max_total_bits / items);
    warn!(capacity, error_rate, "1/capacity underflows; using asymptotic error rate");
    error_rate
}

/// Find the smallest shard count whose per-shard bit array is addressable
///
/// Returns `(shard_count, bits_per_shard)`, or `None` when even
/// `MAX_SHARDS` shards are too small.
fn split_into_shards(capacity: i64, error_rate: f64) -> Option<(usize, usize)> {
    let mut shard_count = 1;
    loop {
        let bits = minimum_bits(capacity as f64 / shard_count as f64, error_rate);
        if bits <= MAX_SHARD_BITS as f64 {
            if bits < 1.0 {
                return None;
            }
            return Some((shard_count, bits as usize));
        }
        if shard_count >= MAX_SHARDS {
            return None;
        }
        shard_count *= SHARD_SPLIT_FACTOR;
        debug!(capacity, shard_count, "Bit array exceeds one shard, splitting");
    }
}

/// Calculate minimum m for n items at the target FPR
///
/// Kept in floating point so oversized results can be detected before
/// converting to an index type.
pub fn minimum_bits(items: f64, target_fpr: f64) -> f64 {
    (-items * target_fpr.ln() / (LN_2 * LN_2)).ceil()
}

/// Calculate optimal k for given m and n
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    ((m as f64 / n as f64) * LN_2).round() as usize
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
