//! Property-based tests for shard-bloom
//!
//! Invariants that should hold for ALL inputs:
//! - No false negatives for any added item, any valid geometry
//! - Add is idempotent
//! - Hex seeds round trip for every non-negative i32
//! - Sizing rejects invalid inputs with range errors

use proptest::prelude::*;
use shard_bloom::domain::{parse_hex_seed, parse_int, Geometry, ParseOptions, Radix};
use shard_bloom::{BloomFilter, FilterConfig, FilterError, FilterService, MembershipApi};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_false_negatives(
        capacity in 1i64..5_000,
        error_rate in 0.0001f64..0.5,
        items in prop::collection::vec(".{0,32}", 1..200),
    ) {
        let mut filter = BloomFilter::with_error_rate(capacity, error_rate).unwrap();
        filter.add_range(&items);
        for item in &items {
            prop_assert!(filter.contains(item), "False negative for {:?}", item);
        }
    }

    #[test]
    fn prop_add_is_idempotent(items in prop::collection::vec("[a-zA-Z0-9]{1,16}", 1..50)) {
        let mut once = BloomFilter::with_error_rate(1_000, 0.01).unwrap();
        let mut twice = BloomFilter::with_error_rate(1_000, 0.01).unwrap();
        once.add_range(&items);
        twice.add_range(&items);
        twice.add_range(&items);

        prop_assert_eq!(once.bits_set(), twice.bits_set());
        prop_assert!(once.shards().zip(twice.shards()).all(|(a, b)| a == b));
    }

    #[test]
    fn prop_hex_round_trip(value in 0i32..=i32::MAX) {
        let upper = format!("{:X}", value);
        let lower = format!("{:x}", value);
        prop_assert_eq!(parse_hex_seed(&upper), Ok(value));
        prop_assert_eq!(parse_hex_seed(&lower), Ok(value));
    }

    #[test]
    fn prop_decimal_round_trip(value in any::<i32>()) {
        let text = value.to_string();
        let parsed = parse_int(&text, ParseOptions::new(Radix::Decimal).tight()).unwrap();
        prop_assert_eq!(parsed.value, value);
        prop_assert_eq!(parsed.end, text.len());
    }

    #[test]
    fn prop_tight_hex_rejects_trailing_junk(value in 0i32..=i32::MAX, junk in "[g-zG-Z ]") {
        let text = format!("{:x}{}", value, junk);
        let err = parse_hex_seed(&text).unwrap_err();
        prop_assert!(err.is_format(), "Expected format error, got {:?}", err);
    }

    #[test]
    fn prop_long_hex_overflows(digits in "[1-9a-f][0-9a-f]{8,12}") {
        let err = parse_hex_seed(&digits).unwrap_err();
        prop_assert!(err.is_overflow(), "Expected overflow for {}, got {:?}", digits, err);
    }

    #[test]
    fn prop_nonpositive_capacity_rejected(capacity in i64::MIN..1, rate in 0.001f64..0.999) {
        prop_assert_eq!(
            Geometry::compute(capacity, Some(rate)),
            Err(FilterError::CapacityOutOfRange { capacity })
        );
    }

    #[test]
    fn prop_error_rate_outside_unit_interval_rejected(capacity in 1i64..i64::MAX, rate in 1.0f64..1e6) {
        let rejected = matches!(
            Geometry::compute(capacity, Some(rate)),
            Err(FilterError::ErrorRateOutOfRange { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn prop_geometry_is_consistent(capacity in 1i64..100_000_000_000, rate in 0.0001f64..0.5) {
        if let Ok(geometry) = Geometry::compute(capacity, Some(rate)) {
            prop_assert!([1, 16, 256].contains(&geometry.shard_count));
            prop_assert!(geometry.bits_per_shard >= 1);
            prop_assert!(geometry.bits_per_shard <= i32::MAX as usize);
            prop_assert!(geometry.hash_function_count >= 1);
            prop_assert_eq!(geometry.shard_capacity, capacity / geometry.shard_count as i64);
        }
    }
}

#[test]
fn test_shard_count_for_half_billion() {
    let geometry = Geometry::compute(517_238_891, Some(0.001)).unwrap();
    assert_eq!(geometry.shard_count, 16);
    assert_eq!(geometry.capacity, 517_238_891);
}

#[test]
fn test_overflow_rejection() {
    assert!(matches!(
        BloomFilter::with_error_rate(999_517_238_891, 0.001),
        Err(FilterError::CapacityTooLarge { .. })
    ));
    assert!(BloomFilter::new(i64::MAX - 1).unwrap_err().is_range());
    assert!(BloomFilter::with_error_rate(i64::MAX - 1, 0.5).unwrap_err().is_range());
}

#[test]
fn test_invalid_input_rejection() {
    assert!(matches!(
        BloomFilter::with_error_rate(0, 0.001),
        Err(FilterError::CapacityOutOfRange { .. })
    ));
    assert!(matches!(
        BloomFilter::with_error_rate(1_000, 10.0),
        Err(FilterError::ErrorRateOutOfRange { .. })
    ));
}

#[test]
fn test_unsupported_radix() {
    let err = Radix::try_from(36u32).unwrap_err();
    assert!(err.is_argument());
}

#[test]
fn test_service_through_port() {
    fn record_all(api: &mut dyn MembershipApi, items: &[&str]) {
        for item in items {
            api.add(item);
        }
    }

    let config = FilterConfig::new(10_000, Some(0.001)).unwrap();
    let mut service = FilterService::new(&config).unwrap();
    record_all(&mut service, &["alice", "bob", "carol"]);

    assert!(service.contains("alice"));
    assert!(service.contains("carol"));
    assert!(service.fill_ratio() > 0.0);
}

#[test]
fn test_session_ids_never_missed() {
    let mut filter = BloomFilter::with_error_rate(5_000, 0.001).unwrap();
    let ids: Vec<String> = (0..5_000).map(|_| uuid::Uuid::new_v4().to_string()).collect();
    filter.add_range(&ids);

    for id in &ids {
        assert!(filter.contains(id), "False negative for {}", id);
    }
    assert_eq!(filter.capacity(), 5_000);
}
