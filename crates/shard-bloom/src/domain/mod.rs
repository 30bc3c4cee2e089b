//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hex/decimal span parser for digest seeds
//! - Parameter sizing and shard splitting
//! - Sharded bit storage
//! - Hash functions
//! - The Bloom filter itself
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod hex_span;
pub mod parameters;
pub mod sharded_bits;

pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder};
pub use hash_functions::{one_at_a_time_hash, stable_hash, HashPair};
pub use hex_span::{parse_hex_seed, parse_int, IntWidth, ParseOptions, ParsedInt, Radix};
pub use parameters::{default_error_rate, Geometry, MAX_SHARDS, MAX_SHARD_BITS};
pub use sharded_bits::ShardedBitSet;
