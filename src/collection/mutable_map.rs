//! Insertion-ordered maps that are updated in place.
//!
//! [`MutableMap`] owns its entries outright: it is always eager, cloning it
//! copies the entries, and updates through one handle are never visible
//! through another. Transformations build a new `MutableMap` and leave the
//! receiver untouched.
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::MutableMap;
//!
//! let mut cache = MutableMap::new();
//! let first = cache.get_or_else_update("answer", || 42);
//! let second = cache.get_or_else_update("answer", || unreachable!());
//! assert_eq!((first, second), (42, 42));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use super::map::Map;
use super::seq::Seq;
use super::shared::{Entries, Window, extreme_entry, group_entries};
use crate::error::CollectionError;
use crate::maybe::Maybe;
use crate::pick::Pick;

/// An insertion-ordered map with in-place updates.
///
/// Updating an existing key keeps its position; removing a key shifts the
/// later entries up by one.
#[derive(Clone)]
pub struct MutableMap<K, V> {
    entries: Entries<K, V>,
}

impl<K, V> MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Entries::default(),
        }
    }

    /// Creates a map that takes ownership of `entries`.
    pub const fn from_entries(entries: Entries<K, V>) -> Self {
        Self { entries }
    }

    /// Creates a map from key/value pairs; later pairs win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(pairs.into_iter().collect())
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Sets `key` to `value` and returns the previous value.
    pub fn update(&mut self, key: K, value: V) -> Maybe<V> {
        self.entries.insert(key, value).into()
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Maybe<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key).into()
    }

    /// Returns the value under `key`, storing the result of `supplier`
    /// first if the key is absent.
    ///
    /// `supplier` runs at most once and only when the key is absent.
    pub fn get_or_else_update<F>(&mut self, key: K, supplier: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(supplier).clone()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the map has at least one entry.
    pub fn non_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Maybe<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).cloned().into()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::MissingKey`] if `key` is absent.
    pub fn at<Q>(&self, key: &Q) -> Result<V, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| CollectionError::missing_key(key))
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the first entry, if any.
    pub fn head_option(&self) -> Maybe<(K, V)> {
        self.entries
            .first()
            .map(|(key, value)| (key.clone(), value.clone()))
            .into()
    }

    /// Returns a snapshot of the keys.
    pub fn keys(&self) -> Seq<K> {
        self.entries.keys().cloned().collect()
    }

    /// Returns a snapshot of the values.
    pub fn values(&self) -> Seq<V> {
        self.entries.values().cloned().collect()
    }

    /// Returns a snapshot of the entries as a sequence of pairs.
    pub fn to_seq(&self) -> Seq<(K, V)> {
        Seq::from_vec(self.to_vec())
    }

    /// Returns a copy of the underlying ordered entries.
    pub fn to_entries(&self) -> Entries<K, V> {
        self.entries.clone()
    }

    /// Returns a snapshot of the entries as `(key, value)` pairs.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns an immutable snapshot; later updates do not affect it.
    pub fn to_map(&self) -> Map<K, V> {
        Map::from_entries(self.entries.clone())
    }

    /// Returns an iterator over borrowed entries.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Transforms every entry into a new `(key, value)` pair.
    pub fn map<K2, V2, F>(&self, mut function: F) -> MutableMap<K2, V2>
    where
        K2: Eq + Hash + Clone + 'static,
        V2: Clone + 'static,
        F: FnMut(V, K) -> (K2, V2),
    {
        self.iter()
            .map(|(key, value)| function(value.clone(), key.clone()))
            .collect()
    }

    /// Transforms every value, keeping the keys.
    pub fn map_values<W, F>(&self, mut function: F) -> MutableMap<K, W>
    where
        W: Clone + 'static,
        F: FnMut(V) -> W,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), function(value.clone())))
            .collect()
    }

    /// Keeps the entries that satisfy `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter()
            .filter(|(key, value)| predicate(value, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Drops the entries that satisfy `predicate`.
    pub fn filter_not<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.filter(|value, key| !predicate(value, key))
    }

    /// Maps every entry to any number of pairs and merges them in order.
    pub fn flat_map<K2, V2, I, F>(&self, mut function: F) -> MutableMap<K2, V2>
    where
        K2: Eq + Hash + Clone + 'static,
        V2: Clone + 'static,
        I: IntoIterator<Item = (K2, V2)>,
        F: FnMut(V, K) -> I,
    {
        self.iter()
            .flat_map(|(key, value)| function(value.clone(), key.clone()))
            .collect()
    }

    /// Keeps the first `count` entries; empty when `count == 0`, an
    /// independent copy when `count < 0`.
    pub fn take(&self, count: isize) -> Self {
        usize::try_from(count).map_or_else(
            |_| self.clone(),
            |count| Self::from_entries(Window::Leading(count).select(&self.entries)),
        )
    }

    /// Keeps the last `count` entries; empty when `count <= 0`.
    pub fn take_right(&self, count: isize) -> Self {
        let count = usize::try_from(count).unwrap_or(0);
        Self::from_entries(Window::Trailing(count).select(&self.entries))
    }

    /// Skips the first `count` entries; an independent copy when
    /// `count <= 0`.
    pub fn drop(&self, count: isize) -> Self {
        let count = usize::try_from(count).unwrap_or(0);
        Self::from_entries(Window::Skipping(count).select(&self.entries))
    }

    /// Groups the entries by the key `projector` derives from each one.
    ///
    /// Every group is a new `MutableMap`; updating one never touches the
    /// receiver.
    pub fn group_by<G, F>(&self, projector: F) -> MutableMap<G, Self>
    where
        G: Eq + Hash + Clone + 'static,
        F: FnMut(&V, &K) -> G,
    {
        group_entries(&self.entries, projector)
            .into_iter()
            .map(|(group, members)| (group, Self::from_entries(members)))
            .collect()
    }

    // =========================================================================
    // Reductions
    // =========================================================================

    /// Counts the entries that satisfy `predicate`.
    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter().filter(|(key, value)| predicate(value, key)).count()
    }

    /// Returns the entry with the greatest value; the first key wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty map.
    pub fn max(&self) -> Result<(K, V), CollectionError>
    where
        V: Ord,
    {
        extreme_entry(&self.entries, "MutableMap::max", |value, _| value.clone(), Ordering::Greater)
    }

    /// Returns the entry with the smallest value; the first key wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty map.
    pub fn min(&self) -> Result<(K, V), CollectionError>
    where
        V: Ord,
    {
        extreme_entry(&self.entries, "MutableMap::min", |value, _| value.clone(), Ordering::Less)
    }

    /// Returns the entry with the greatest projected key; the first entry
    /// wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty map.
    pub fn max_by<O, F>(&self, projector: F) -> Result<(K, V), CollectionError>
    where
        O: Ord,
        F: FnMut(&V, &K) -> O,
    {
        extreme_entry(&self.entries, "MutableMap::max_by", projector, Ordering::Greater)
    }

    /// Returns the entry with the smallest projected key; the first entry
    /// wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty map.
    pub fn min_by<O, F>(&self, projector: F) -> Result<(K, V), CollectionError>
    where
        O: Ord,
        F: FnMut(&V, &K) -> O,
    {
        extreme_entry(&self.entries, "MutableMap::min_by", projector, Ordering::Less)
    }

    /// Folds the entries in iteration order.
    pub fn fold<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V, K) -> B,
    {
        self.iter().fold(init, |accumulator, (key, value)| {
            function(accumulator, value.clone(), key.clone())
        })
    }

    /// Returns the first entry that satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Maybe<(K, V)>
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .into()
    }

    /// Returns `true` if some entry satisfies `predicate`.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter().any(|(key, value)| predicate(value, key))
    }

    /// Returns `true` if every entry satisfies `predicate`.
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter().all(|(key, value)| predicate(value, key))
    }

    /// Calls `action` on every entry in order.
    pub fn each<F>(&self, mut action: F)
    where
        F: FnMut(V, K),
    {
        for (key, value) in &self.entries {
            action(value.clone(), key.clone());
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V> Default for MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V> Extend<(K, V)> for MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> From<Map<K, V>> for MutableMap<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn from(map: Map<K, V>) -> Self {
        Self::from_entries(map.to_entries())
    }
}

impl<'a, K, V> IntoIterator for &'a MutableMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> IntoIterator for MutableMap<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for MutableMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Eq> Eq for MutableMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MutableMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("MutableMap ")?;
        formatter.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K, V, Q> Pick<Q> for MutableMap<K, V>
where
    K: Eq + Hash + Clone + Borrow<Q> + 'static,
    V: Clone + 'static,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn pick(&self, name: &Q) -> Option<V> {
        self.entries.get(name).cloned()
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for MutableMap<K, V>
where
    K: serde::Serialize + Eq + Hash,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.entries, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for MutableMap<K, V>
where
    K: serde::Deserialize<'de> + Eq + Hash + Clone + 'static,
    V: serde::Deserialize<'de> + Clone + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Entries<K, V> as serde::Deserialize>::deserialize(deserializer).map(Self::from_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_update_returns_previous_value() {
        let mut map = MutableMap::new();
        assert_eq!(map.update("a", 1), Maybe::None);
        assert_eq!(map.update("a", 2), Maybe::Some(1));
        assert_eq!(map.get("a"), Maybe::Some(2));
    }

    #[rstest]
    fn test_remove_shifts_later_entries() {
        let mut map = MutableMap::from_pairs([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(map.remove("b"), Maybe::Some(2));
        assert_eq!(map.to_vec(), vec![("a", 1), ("c", 3)]);
        assert_eq!(map.remove("b"), Maybe::None);
    }

    #[rstest]
    fn test_clone_is_independent() {
        let mut original = MutableMap::from_pairs([("a", 1)]);
        let copy = original.clone();
        original.update("b", 2);
        assert_eq!(copy.len(), 1);
        assert_eq!(original.len(), 2);
    }

    #[rstest]
    fn test_to_map_is_a_snapshot() {
        let mut map = MutableMap::from_pairs([("a", 1)]);
        let snapshot = map.to_map();
        map.clear();
        assert_eq!(snapshot.len(), 1);
        assert!(map.is_empty());
    }

    #[rstest]
    fn test_debug() {
        let map = MutableMap::from_pairs([("a", 1)]);
        assert_eq!(format!("{map:?}"), "MutableMap {\"a\": 1}");
    }

    #[rstest]
    fn test_at_reports_missing_key() {
        let map: MutableMap<String, i32> = MutableMap::new();
        assert_eq!(
            map.at("gone"),
            Err(CollectionError::MissingKey {
                key: "\"gone\"".to_string()
            })
        );
    }
}
