//! Fixed-size bit arrays split into shards
//!
//! Each item lives in exactly one shard, picked from its first character.
//! That selector only spreads well when leading characters are spread
//! (hex digests, mixed-case passwords); items sharing a first character
//! all land in the same shard.

use bitvec::prelude::*;

/// One or more equally sized bit arrays, all bits initially unset
#[derive(Clone, Debug)]
pub struct ShardedBitSet {
    shards: Vec<BitVec<u64, Lsb0>>,
    bits_per_shard: usize,
}

impl ShardedBitSet {
    /// Allocate `shard_count` zeroed shards of `bits_per_shard` bits
    pub fn new(shard_count: usize, bits_per_shard: usize) -> Self {
        let shards = (0..shard_count)
            .map(|_| bitvec![u64, Lsb0; 0; bits_per_shard])
            .collect();
        Self {
            shards,
            bits_per_shard,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn bits_per_shard(&self) -> usize {
        self.bits_per_shard
    }

    pub fn total_bits(&self) -> u64 {
        self.shards.len() as u64 * self.bits_per_shard as u64
    }

    /// Shard holding `item`
    ///
    /// Shard 0 for a single shard or an empty item; otherwise the first
    /// UTF-16 code unit, wrapped into range.
    pub fn select_shard(&self, item: &str) -> usize {
        if self.shards.len() == 1 {
            return 0;
        }
        match item.encode_utf16().next() {
            Some(first) => usize::from(first) % self.shards.len(),
            None => 0,
        }
    }

    pub fn get(&self, shard: usize, bit: usize) -> bool {
        self.shards[shard][bit]
    }

    /// Set a bit. There is no way to clear one.
    pub fn set(&mut self, shard: usize, bit: usize) {
        self.shards[shard].set(bit, true);
    }

    /// Set bits across all shards
    pub fn count_true_bits(&self) -> u64 {
        self.shards.iter().map(|s| s.count_ones() as u64).sum()
    }

    /// Fraction of set bits in one shard
    pub fn true_ratio(&self, shard: usize) -> f64 {
        if self.bits_per_shard == 0 {
            return 0.0;
        }
        self.shards[shard].count_ones() as f64 / self.bits_per_shard as f64
    }

    /// Read-only view of one shard
    pub fn shard(&self, index: usize) -> Option<&BitSlice<u64, Lsb0>> {
        self.shards.get(index).map(|s| s.as_bitslice())
    }

    /// Read-only views of every shard, in shard order
    pub fn shards(&self) -> impl ExactSizeIterator<Item = &BitSlice<u64, Lsb0>> {
        self.shards.iter().map(|s| s.as_bitslice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        let bits = ShardedBitSet::new(16, 1000);
        assert_eq!(bits.shard_count(), 16);
        assert_eq!(bits.total_bits(), 16_000);
        assert_eq!(bits.count_true_bits(), 0);
        assert!(bits.shards().all(|s| s.not_any()));
    }

    #[test]
    fn test_set_and_get() {
        let mut bits = ShardedBitSet::new(2, 64);
        bits.set(1, 63);
        bits.set(1, 63);
        assert!(bits.get(1, 63));
        assert!(!bits.get(0, 63));
        assert_eq!(bits.count_true_bits(), 1);
        assert_eq!(bits.true_ratio(1), 1.0 / 64.0);
        assert_eq!(bits.true_ratio(0), 0.0);
    }

    #[test]
    fn test_single_shard_always_zero() {
        let bits = ShardedBitSet::new(1, 10);
        assert_eq!(bits.select_shard("zebra"), 0);
        assert_eq!(bits.select_shard(""), 0);
    }

    #[test]
    fn test_select_shard_by_first_character() {
        let bits = ShardedBitSet::new(256, 8);
        assert_eq!(bits.select_shard("A123"), 65);
        assert_eq!(bits.select_shard("a"), 97);
        assert_eq!(bits.select_shard(""), 0);

        let sixteen = ShardedBitSet::new(16, 8);
        // '5' = 53, 53 % 16 = 5
        assert_eq!(sixteen.select_shard("5baa61e4"), 5);
    }

    #[test]
    fn test_select_shard_wraps_wide_characters() {
        let bits = ShardedBitSet::new(256, 8);
        // 'é' = 233 fits, '€' = 0x20AC wraps to 0xAC
        assert_eq!(bits.select_shard("été"), 233);
        assert_eq!(bits.select_shard("€uro"), 0xAC);
    }

    #[test]
    fn test_shard_view() {
        let mut bits = ShardedBitSet::new(2, 32);
        bits.set(0, 3);
        let view = bits.shard(0).unwrap();
        assert!(view[3]);
        assert_eq!(view.len(), 32);
        assert!(bits.shard(2).is_none());
    }
}
