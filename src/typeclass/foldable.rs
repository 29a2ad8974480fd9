//! Foldable type class - folding over collections.
//!
//! [`Foldable`] reduces every element of a structure into a summary value.
//! It gives generic code one way to consume a [`Maybe`], a [`Seq`] or the
//! values of a [`Map`].
//!
//! # Laws
//!
//! ## Consistency with `to_list`
//!
//! ```text
//! fa.fold_left(init, f) == fa.to_list().into_iter().fold(init, f)
//! ```
//!
//! ## Consistency between `fold_left` and `fold_right`
//!
//! ```text
//! fa.fold_left(init, f) == fa.fold_right(init, flip(f))  // when f is associative
//! ```
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::Seq;
//! use scollections::maybe::Maybe;
//! use scollections::typeclass::Foldable;
//!
//! fn total<F: Foldable<Inner = i32>>(values: F) -> i32 {
//!     values.fold_left(0, |accumulator, element| accumulator + element)
//! }
//!
//! assert_eq!(total(Seq::from_items([1, 2, 3])), 6);
//! assert_eq!(total(Maybe::some(4)), 4);
//! assert_eq!(total(Maybe::none()), 0);
//! ```

use std::hash::Hash;

use super::higher::TypeConstructor;
use crate::collection::{Map, MutableMap, Seq};
use crate::maybe::Maybe;

/// A structure whose elements can be folded into a summary value.
///
/// # Required Methods
///
/// - `fold_left`: left-associative fold
/// - `fold_right`: right-associative fold
///
/// The other methods are derived from `fold_left`.
pub trait Foldable: TypeConstructor {
    /// Folds the structure from left to right.
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds the structure from right to left.
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    /// use scollections::typeclass::Foldable;
    ///
    /// let digits = Seq::from_items([1, 2, 3]);
    /// let text = digits.fold_right(String::new(), |element, accumulator| {
    ///     format!("{accumulator}{element}")
    /// });
    /// assert_eq!(text, "321");
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Returns the number of elements.
    fn length(&self) -> usize
    where
        Self: Clone,
    {
        self.clone().fold_left(0, |count, _| count + 1)
    }

    /// Collects the elements into a `Vec` in folding order.
    fn to_list(self) -> Vec<Self::Inner>
    where
        Self: Sized,
    {
        self.fold_left(Vec::new(), |mut elements, element| {
            elements.push(element);
            elements
        })
    }

    /// Returns the first element that satisfies `predicate`.
    fn find_first<P>(self, mut predicate: P) -> Option<Self::Inner>
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Sized,
    {
        self.fold_left(None, |found, element| {
            found.or_else(|| predicate(&element).then_some(element))
        })
    }
}

impl<A> Foldable for Maybe<A> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        match self {
            Self::Some(value) => function(init, value),
            Self::None => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        match self {
            Self::Some(value) => function(value, init),
            Self::None => init,
        }
    }

    fn length(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl<T: Clone + 'static> Foldable for Seq<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.to_vec()
            .into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    fn length(&self) -> usize {
        self.len()
    }

    fn to_list(self) -> Vec<T> {
        self.to_vec()
    }
}

impl<K, V> Foldable for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.fold(init, |accumulator, value, _| function(accumulator, value))
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(V, B) -> B,
    {
        self.values()
            .to_vec()
            .into_iter()
            .rev()
            .fold(init, |accumulator, value| function(value, accumulator))
    }

    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Foldable for MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.into_iter()
            .fold(init, |accumulator, (_, value)| function(accumulator, value))
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(V, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, (_, value)| function(value, accumulator))
    }

    fn length(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn maybe_fold_left_some() {
        assert_eq!(Maybe::some(10).fold_left(5, |a, b| a + b), 15);
    }

    #[rstest]
    fn maybe_fold_left_none() {
        assert_eq!(Maybe::<i32>::none().fold_left(5, |a, b| a + b), 5);
    }

    #[rstest]
    fn seq_fold_right_visits_last_first() {
        let letters = Seq::from_items(["a", "b", "c"]);
        let joined = letters.fold_right(String::new(), |element, mut accumulator| {
            accumulator.push_str(element);
            accumulator
        });
        assert_eq!(joined, "cba");
    }

    #[rstest]
    fn lazy_seq_folds_like_eager_seq() {
        let lazy = Seq::lazy(1..=4);
        let eager = Seq::from_items([1, 2, 3, 4]);
        assert_eq!(
            lazy.fold_left(0, |a, b| a * 10 + b),
            eager.fold_left(0, |a, b| a * 10 + b)
        );
    }

    #[rstest]
    fn map_folds_over_values() {
        let stock = Map::from_pairs([("apples", 3), ("pears", 4)]);
        assert_eq!(stock.length(), 2);
        assert_eq!(stock.to_list(), vec![3, 4]);
    }

    #[rstest]
    fn mutable_map_fold_right_reverses_order() {
        let map = MutableMap::from_pairs([("a", 1), ("b", 2)]);
        let values = map.fold_right(Vec::new(), |value, mut accumulator| {
            accumulator.push(value);
            accumulator
        });
        assert_eq!(values, vec![2, 1]);
    }

    #[rstest]
    fn find_first_stops_at_first_match() {
        let seq = Seq::from_items([1, 4, 6]);
        assert_eq!(seq.find_first(|n| n % 2 == 0), Some(4));
    }
}
