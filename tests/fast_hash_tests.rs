//! Tests for the hasher feature flags.
//!
//! The same assertions run under every hasher selection (`fxhash`, `ahash`
//! or the standard library default); keyed behavior and insertion order must
//! not depend on the hasher.

use rstest::rstest;
use scollections::collection::{Map, MutableMap, Seq};
use scollections::maybe::Maybe;

// =============================================================================
// Deterministic Behavior
// =============================================================================

/// Maps built from the same entries answer the same lookups.
#[rstest]
fn test_identical_maps_behave_identically() {
    let entries = vec![
        ("alpha".to_string(), 1),
        ("beta".to_string(), 2),
        ("gamma".to_string(), 3),
    ];
    let first: Map<String, i32> = entries.iter().cloned().collect();
    let second: Map<String, i32> = entries.iter().cloned().collect();

    for (key, value) in &entries {
        assert_eq!(first.get(key.as_str()), Maybe::Some(*value));
        assert_eq!(second.get(key.as_str()), Maybe::Some(*value));
    }
    assert_eq!(first, second);
}

/// Iteration follows insertion order regardless of hash values.
#[rstest]
fn test_order_is_independent_of_hasher() {
    let keys: Vec<u64> = vec![u64::MAX, 0, 17, 1 << 40, 3];
    let map: Map<u64, usize> = keys.iter().copied().zip(0..).collect();
    assert_eq!(map.keys().to_vec(), keys);
}

// =============================================================================
// Large Scale Tests
// =============================================================================

#[rstest]
fn test_large_scale_insert_and_retrieve() {
    const COUNT: i32 = 10_000;

    let map: Map<i32, i32> = (0..COUNT).map(|x| (x, x * 2)).collect();

    for i in 0..COUNT {
        assert_eq!(map.get(&i), Maybe::Some(i * 2), "Failed to get key {i}");
    }
    for i in COUNT..(COUNT + 100) {
        assert_eq!(map.get(&i), Maybe::None, "Key {i} should not exist");
    }
}

#[rstest]
fn test_distinct_over_many_values() {
    let values = Seq::lazy((0..5_000).map(|value| value % 1_000));
    let distinct = values.distinct();
    assert_eq!(distinct.len(), 1_000);
    assert_eq!(distinct.take(3).to_vec(), vec![0, 1, 2]);
}

// =============================================================================
// Edge Case Tests
// =============================================================================

#[rstest]
fn test_similar_and_special_keys() {
    let mut map = MutableMap::new();
    for (index, key) in ["", "a", "aa", "aaa", "\0", "\n", " "].into_iter().enumerate() {
        map.update(key.to_string(), index);
    }

    assert_eq!(map.get(""), Maybe::Some(0));
    assert_eq!(map.get("aaa"), Maybe::Some(3));
    assert_eq!(map.get("\0"), Maybe::Some(4));
    assert_eq!(map.len(), 7);
}
