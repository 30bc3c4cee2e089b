//! # shard-bloom
//!
//! Sharded Bloom filter for "have I seen this before?" checks on strings
//! such as passwords or hex digest prefixes, with zero false negatives and a
//! configurable false positive rate.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `Geometry`: capacity + error rate → shards, bits, hash count
//!   - `ShardedBitSet`: one or more fixed bit arrays
//!   - `BloomFilter`: double-hashing membership engine
//!   - `hex_span`: allocation-free integer parsing for digest seeds
//!   - `FilterConfig` / `FilterConfigBuilder`: validated configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipApi`: Driving port (inbound API)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `FilterService`: Implements `MembershipApi` with metrics and logging
//!
//! ## Invariants
//!
//! - **No false negatives**: if added, `contains()` MUST return true
//! - **Monotonic**: bits are only ever set, never cleared
//! - **Deterministic**: the same item probes the same bits in every process
//!
//! ## Sharding
//!
//! One shard is indexed with 32-bit signed positions. Filters whose optimal
//! bit count does not fit are split into 16 or 256 shards; beyond that,
//! construction fails with `FilterError::CapacityTooLarge`. Items are routed
//! by their first character, so inputs sharing a leading character share a
//! shard.
//!
//! ## Usage Example
//!
//! ```
//! use shard_bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::with_error_rate(10_000, 0.001)?;
//! filter.add("hunter2");
//!
//! assert!(filter.contains("hunter2"));
//! assert_eq!(filter.hash_function_count(), 10);
//!
//! // Digest text seeds the hashes directly
//! filter.add_digest("5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8")?;
//! assert!(filter.contains_digest("5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Concurrency
//!
//! No internal locking. `contains` takes `&self` and may be shared across
//! threads; `add` takes `&mut self`, so concurrent writers need external
//! synchronisation.

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{BloomFilter, FilterConfig, FilterConfigBuilder, Geometry, ShardedBitSet};
pub use error::{FilterError, ParseError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::MembershipApi;
pub use service::FilterService;
