//! Hash functions for the Bloom filter
//!
//! Both hashes are seed-free and deterministic, so a filter built in one
//! process probes the same bits in every other process. They run over the
//! UTF-16 code units of the item text.
//!
//! Probe positions use double hashing: h(i) = h1 + i * h2

use super::hex_span::{parse_hex_seed, window};
use crate::error::ParseError;

/// Initial state for both lanes of `stable_hash`
const STABLE_SEED: i32 = (5381 << 16) + 5381;

/// Multiplier folding the second lane into the first
const STABLE_MIX: i32 = 1_566_083_941;

/// Number of hex characters per digest seed
pub const DIGEST_SEED_CHARS: usize = 8;

/// Two-lane interleaved multiplicative hash
///
/// Even code units feed the first lane, odd ones the second; each lane is
/// `h = (h * 33) ^ c`.
pub fn stable_hash(item: &str) -> i32 {
    let mut h1 = STABLE_SEED;
    let mut h2 = STABLE_SEED;

    let mut units = item.encode_utf16();
    while let Some(even) = units.next() {
        h1 = (h1 << 5).wrapping_add(h1) ^ i32::from(even);
        match units.next() {
            Some(odd) => h2 = (h2 << 5).wrapping_add(h2) ^ i32::from(odd),
            None => break,
        }
    }

    h1.wrapping_add(h2.wrapping_mul(STABLE_MIX))
}

/// Bob Jenkins' one-at-a-time hash
pub fn one_at_a_time_hash(item: &str) -> i32 {
    let mut hash: u32 = 0;
    for unit in item.encode_utf16() {
        hash = hash.wrapping_add(u32::from(unit));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash as i32
}

/// Primary and secondary hash of one item
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashPair {
    pub primary: i32,
    pub secondary: i32,
}

impl HashPair {
    /// Hash raw item text
    pub fn of_text(item: &str) -> Self {
        Self {
            primary: stable_hash(item),
            secondary: one_at_a_time_hash(item),
        }
    }

    /// Take the seeds straight from a hex digest: characters [0, 8) and [8, 16)
    pub fn of_digest(digest: &str) -> Result<Self, ParseError> {
        let primary = parse_hex_seed(window(digest, 0..DIGEST_SEED_CHARS)?)?;
        let secondary =
            parse_hex_seed(window(digest, DIGEST_SEED_CHARS..2 * DIGEST_SEED_CHARS)?)?;
        Ok(Self { primary, secondary })
    }

    /// The k probe positions inside a shard of `bits` bits
    ///
    /// `bits` must be in `1..=i32::MAX`.
    pub fn probe_positions(self, k: usize, bits: usize) -> impl Iterator<Item = usize> {
        let modulus = bits as i32;
        (0..k).map(move |i| {
            let combined = self
                .primary
                .wrapping_add((i as i32).wrapping_mul(self.secondary));
            (combined % modulus).unsigned_abs() as usize
        })
    }
}
