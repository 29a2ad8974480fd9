//! Property-based tests for `Seq` laws.
//!
//! Each law is checked on eager sequences and on lazy sequences over the
//! same elements.

use proptest::prelude::*;
use scollections::collection::Seq;

fn both(elements: &[i32]) -> [Seq<i32>; 2] {
    [
        Seq::from_vec(elements.to_vec()),
        Seq::lazy(elements.to_vec()),
    ]
}

// =============================================================================
// Filter Law
// =============================================================================

proptest! {
    /// Every element kept by `filter(p)` satisfies `p`.
    #[test]
    fn prop_filter_then_for_all(elements in prop::collection::vec(any::<i32>(), 0..40), divisor in 1..5i32) {
        for seq in both(&elements) {
            let kept = seq.filter(move |value| value % divisor == 0);
            prop_assert!(kept.for_all(|value| value % divisor == 0));
        }
    }
}

// =============================================================================
// Reverse Law
// =============================================================================

proptest! {
    /// Reversing twice restores the original order.
    #[test]
    fn prop_reverse_is_an_involution(elements in prop::collection::vec(any::<i32>(), 0..40)) {
        for seq in both(&elements) {
            prop_assert_eq!(seq.reverse().reverse().to_vec(), elements.clone());
        }
    }
}

// =============================================================================
// Take/Drop Partition Law
// =============================================================================

proptest! {
    /// `take(n)` has at most `max(n, 0)` elements.
    #[test]
    fn prop_take_is_bounded(elements in prop::collection::vec(any::<i32>(), 0..40), count in -5isize..50) {
        for seq in both(&elements) {
            let bound = usize::try_from(count.max(0)).unwrap_or(0);
            let taken = seq.take(count).len();
            if count < 0 {
                prop_assert_eq!(taken, elements.len());
            } else {
                prop_assert!(taken <= bound);
            }
        }
    }
}

proptest! {
    /// `take(n)` followed by `drop(n)` restores the sequence for `n >= 0`.
    #[test]
    fn prop_take_and_drop_partition(elements in prop::collection::vec(any::<i32>(), 0..40), count in 0isize..50) {
        for seq in both(&elements) {
            let rejoined = seq.take(count).append(seq.drop(count));
            prop_assert_eq!(rejoined.to_vec(), elements.clone());
        }
    }
}

// =============================================================================
// Eager/Lazy Equivalence
// =============================================================================

proptest! {
    /// A pipeline produces the same elements on both backings.
    #[test]
    fn prop_lazy_pipeline_matches_eager(elements in prop::collection::vec(-100i32..100, 0..40), count in 0isize..20) {
        let [eager, lazy] = both(&elements);
        let pipeline = |seq: &Seq<i32>| {
            seq.map(|value| value * 3)
                .filter(|value| value % 2 == 0)
                .distinct()
                .take(count)
                .to_vec()
        };
        prop_assert_eq!(pipeline(&eager), pipeline(&lazy));
    }
}

proptest! {
    /// `sort_by` is stable: equal keys keep their source order.
    #[test]
    fn prop_sort_by_is_stable(elements in prop::collection::vec(0i32..5, 0..40)) {
        let indexed: Vec<(i32, usize)> = elements.iter().copied().zip(0..).collect();
        let sorted = Seq::from_vec(indexed).sort_by(|(key, _)| *key).to_vec();
        for window in sorted.windows(2) {
            let ((left_key, left_index), (right_key, right_index)) = (window[0], window[1]);
            prop_assert!(left_key < right_key || (left_key == right_key && left_index < right_index));
        }
    }
}

proptest! {
    /// `distinct` keeps exactly the first occurrence of every value.
    #[test]
    fn prop_distinct_keeps_first_occurrences(elements in prop::collection::vec(0i32..10, 0..40)) {
        let mut expected = Vec::new();
        for value in &elements {
            if !expected.contains(value) {
                expected.push(*value);
            }
        }
        for seq in both(&elements) {
            prop_assert_eq!(seq.distinct().to_vec(), expected.clone());
        }
    }
}
