//! Sharded double-hashing Bloom filter
//!
//! INVARIANTS:
//! - No false negatives: once `add(item)` returns, `contains(item)` is true
//! - Bits only ever go from unset to set
//! - Geometry is fixed at construction

use bitvec::prelude::*;
use tracing::info;

use super::config::FilterConfig;
use super::hash_functions::HashPair;
use super::parameters::Geometry;
use super::sharded_bits::ShardedBitSet;
use crate::error::{FilterError, ParseError};

/// Bloom filter for probabilistic "seen before" checks on strings
///
/// False positives are possible, false negatives are not.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    geometry: Geometry,
    bits: ShardedBitSet,
}

impl BloomFilter {
    /// Create a filter for `capacity` items with an error rate derived from it
    pub fn new(capacity: i64) -> Result<Self, FilterError> {
        Ok(Self::from_geometry(Geometry::compute(capacity, None)?))
    }

    /// Create a filter for `capacity` items at `error_rate`
    pub fn with_error_rate(capacity: i64, error_rate: f64) -> Result<Self, FilterError> {
        let geometry = Geometry::compute(capacity, Some(error_rate))?;
        Ok(Self::from_geometry(geometry))
    }

    /// Create a filter from a validated configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        Ok(Self::from_geometry(config.geometry()?))
    }

    fn from_geometry(geometry: Geometry) -> Self {
        let bits = ShardedBitSet::new(geometry.shard_count, geometry.bits_per_shard);
        info!(
            capacity = geometry.capacity,
            error_rate = geometry.error_rate,
            shards = geometry.shard_count,
            bits_per_shard = geometry.bits_per_shard,
            hash_functions = geometry.hash_function_count,
            "Bloom filter allocated"
        );
        Self { geometry, bits }
    }

    /// Insert an item
    ///
    /// Adding the same item again changes nothing.
    pub fn add(&mut self, item: &str) {
        self.set_probes(item, HashPair::of_text(item));
    }

    /// Insert every item of a batch
    pub fn add_range<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.add(item.as_ref());
        }
    }

    /// Test whether an item might have been added
    ///
    /// - `true`: possibly added (could be a false positive)
    /// - `false`: definitely never added
    pub fn contains(&self, item: &str) -> bool {
        self.all_probes_set(item, HashPair::of_text(item))
    }

    /// Insert a hex digest, seeding the hashes from its first 16 characters
    pub fn add_digest(&mut self, digest: &str) -> Result<(), ParseError> {
        let hashes = HashPair::of_digest(digest)?;
        self.set_probes(digest, hashes);
        Ok(())
    }

    /// Test a hex digest inserted with `add_digest`
    pub fn contains_digest(&self, digest: &str) -> Result<bool, ParseError> {
        let hashes = HashPair::of_digest(digest)?;
        Ok(self.all_probes_set(digest, hashes))
    }

    fn set_probes(&mut self, item: &str, hashes: HashPair) {
        let shard = self.bits.select_shard(item);
        let (k, bits) = (self.geometry.hash_function_count, self.geometry.bits_per_shard);
        for pos in hashes.probe_positions(k, bits) {
            self.bits.set(shard, pos);
        }
    }

    fn all_probes_set(&self, item: &str, hashes: HashPair) -> bool {
        let shard = self.bits.select_shard(item);
        let (k, bits) = (self.geometry.hash_function_count, self.geometry.bits_per_shard);
        hashes
            .probe_positions(k, bits)
            .all(|pos| self.bits.get(shard, pos))
    }

    /// Fraction of set bits over the whole filter
    ///
    /// About 0.5 once `capacity` distinct items have been added.
    pub fn truthiness(&self) -> f64 {
        self.bits.count_true_bits() as f64 / self.bits.total_bits() as f64
    }

    /// Fraction of set bits per shard, in shard order
    pub fn bit_true_ratios(&self) -> Vec<f64> {
        (0..self.bits.shard_count())
            .map(|shard| self.bits.true_ratio(shard))
            .collect()
    }

    /// Read-only views of the shard bit arrays
    pub fn shards(&self) -> impl ExactSizeIterator<Item = &BitSlice<u64, Lsb0>> {
        self.bits.shards()
    }

    /// Number of set bits across all shards
    pub fn bits_set(&self) -> u64 {
        self.bits.count_true_bits()
    }

    /// Configured capacity, exactly as requested
    ///
    /// May exceed `total_capacity` when the capacity does not divide evenly
    /// across shards.
    pub fn capacity(&self) -> i64 {
        self.geometry.capacity
    }

    /// `shard_count * shard_capacity`
    pub fn total_capacity(&self) -> i64 {
        self.geometry.shard_count as i64 * self.geometry.shard_capacity
    }

    pub fn shard_count(&self) -> usize {
        self.geometry.shard_count
    }

    pub fn shard_capacity(&self) -> i64 {
        self.geometry.shard_capacity
    }

    pub fn error_rate(&self) -> f64 {
        self.geometry.error_rate
    }

    pub fn hash_function_count(&self) -> usize {
        self.geometry.hash_function_count
    }

    pub fn bits_per_shard(&self) -> usize {
        self.geometry.bits_per_shard
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}
