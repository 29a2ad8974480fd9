//! Insertion-ordered associative maps with eager and lazy backings.
//!
//! A [`Map<K, V>`] holds unique keys in insertion order. Like [`Seq`] it is
//! either *materialized* (entries already in memory) or *deferred* (a
//! producer of key/value pairs that runs on first read, exactly once).
//! Transformations of a deferred map stay deferred; the first read of the
//! result evaluates the whole chain and keeps the entries.
//!
//! Key uniqueness means a deferred map cannot hand out a key before its
//! producer has finished (a later pair may overwrite it), so reads always
//! evaluate the producer completely.
//!
//! Callbacks receive `(value, key)`, in that order.
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::Map;
//!
//! let cars = Map::from_pairs([("Civic", "Honda")]).append("Levorg", "Subaru");
//! assert_eq!(cars.to_vec(), vec![("Civic", "Honda"), ("Levorg", "Subaru")]);
//!
//! let japanese = cars.filter(|maker, _| maker.starts_with('H'));
//! assert_eq!(japanese.keys().to_vec(), vec!["Civic"]);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use super::seq::Seq;
use super::shared::{Entries, Window, extreme_entry, group_entries, shared_empty};
use crate::control::Memo;
use crate::error::CollectionError;
use crate::maybe::Maybe;
use crate::pick::Pick;

enum MapBacking<K, V> {
    Materialized(Rc<Entries<K, V>>),
    Deferred(Rc<Memo<Rc<Entries<K, V>>>>),
}

/// An insertion-ordered map with unique keys.
///
/// Inserting an existing key replaces its value and keeps its position.
/// Cloning a `Map` is cheap and shares the entries.
pub struct Map<K, V> {
    backing: MapBacking<K, V>,
}

static_assertions::assert_not_impl_any!(Map<String, i32>: Send, Sync);

impl<K, V> Clone for Map<K, V> {
    fn clone(&self) -> Self {
        let backing = match &self.backing {
            MapBacking::Materialized(entries) => MapBacking::Materialized(Rc::clone(entries)),
            MapBacking::Deferred(memo) => MapBacking::Deferred(Rc::clone(memo)),
        };
        Self { backing }
    }
}

impl<K, V> Map<K, V> {
    /// Returns `true` if both maps share the same backing storage.
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (&left.backing, &right.backing) {
            (MapBacking::Materialized(left), MapBacking::Materialized(right)) => {
                Rc::ptr_eq(left, right)
            }
            (MapBacking::Deferred(left), MapBacking::Deferred(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns `true` if the map is backed by in-memory entries.
    pub const fn is_computed(&self) -> bool {
        matches!(self.backing, MapBacking::Materialized(_))
    }
}

impl<K, V> Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an eager map that takes ownership of `entries`.
    pub fn from_entries(entries: Entries<K, V>) -> Self {
        Self {
            backing: MapBacking::Materialized(Rc::new(entries)),
        }
    }

    /// Creates an eager map from key/value pairs. Later pairs overwrite the
    /// values of earlier ones with the same key.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(pairs.into_iter().collect())
    }

    /// Creates an eager map from optional pairs; `None` yields the shared
    /// empty map.
    pub fn from_source<I>(source: Option<I>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        source.map_or_else(Self::empty, Self::from_pairs)
    }

    /// Creates a lazy map over a single-pass producer of pairs.
    ///
    /// The producer runs to completion on the first read and never again.
    /// Every read needs the whole producer, including `take`, `head_option`
    /// and `is_empty`, so `pairs` must be finite; use a lazy [`Seq`] of pairs
    /// and [`Seq::take`] to cut an unbounded producer first.
    pub fn lazy<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'static,
    {
        let producer = pairs.into_iter();
        Self::deferred(move || producer.collect())
    }

    /// Creates a lazy map from a producer factory, called on first read.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::deferred(move || factory().into_iter().collect())
    }

    pub(super) fn deferred<F>(build: F) -> Self
    where
        F: FnOnce() -> Entries<K, V> + 'static,
    {
        Self {
            backing: MapBacking::Deferred(Rc::new(Memo::new(move || Rc::new(build())))),
        }
    }

    /// Returns the shared empty map.
    pub fn empty() -> Self {
        shared_empty(|| Self::from_entries(Entries::default()))
    }

    // =========================================================================
    // Materialization
    // =========================================================================

    fn entries(&self) -> Rc<Entries<K, V>> {
        match &self.backing {
            MapBacking::Materialized(entries) => Rc::clone(entries),
            MapBacking::Deferred(memo) => {
                if !memo.is_ready() {
                    log::trace!("forcing deferred Map");
                }
                Rc::clone(&memo.force())
            }
        }
    }

    /// Applies `pipeline` to the entries: immediately for an eager receiver,
    /// on first read of the result for a lazy one.
    fn transform<K2, V2, F>(&self, pipeline: F) -> Map<K2, V2>
    where
        K2: Eq + Hash + Clone + 'static,
        V2: Clone + 'static,
        F: FnOnce(&Entries<K, V>) -> Entries<K2, V2> + 'static,
    {
        match &self.backing {
            MapBacking::Materialized(entries) => Map::from_entries(pipeline(entries)),
            MapBacking::Deferred(_) => {
                let parent = self.clone();
                Map::deferred(move || pipeline(&parent.entries()))
            }
        }
    }

    /// Projects every entry into a sequence, lazily for a lazy receiver.
    fn project<U, F>(&self, mut projection: F) -> Seq<U>
    where
        U: Clone + 'static,
        F: FnMut(&K, &V) -> U + 'static,
    {
        match &self.backing {
            MapBacking::Materialized(entries) => entries
                .iter()
                .map(|(key, value)| projection(key, value))
                .collect(),
            MapBacking::Deferred(_) => {
                let parent = self.clone();
                Seq::from_fn(move || {
                    parent
                        .entries()
                        .iter()
                        .map(|(key, value)| projection(key, value))
                        .collect::<Vec<_>>()
                })
            }
        }
    }

    /// Returns an eager map with the same entries.
    ///
    /// An eager receiver is returned as is.
    pub fn computed(&self) -> Self {
        match &self.backing {
            MapBacking::Materialized(_) => self.clone(),
            MapBacking::Deferred(_) => {
                log::debug!("materializing deferred Map");
                Self {
                    backing: MapBacking::Materialized(self.entries()),
                }
            }
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
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
        self.entries().get(key).cloned().into()
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
        self.get(key)
            .to_option()
            .ok_or_else(|| CollectionError::missing_key(key))
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries().contains_key(key)
    }

    /// Returns the first entry, if any.
    pub fn head_option(&self) -> Maybe<(K, V)> {
        self.iter().next().into()
    }

    /// Returns the keys in iteration order.
    pub fn keys(&self) -> Seq<K> {
        self.project(|key, _| key.clone())
    }

    /// Returns the values in iteration order.
    pub fn values(&self) -> Seq<V> {
        self.project(|_, value| value.clone())
    }

    /// Returns the entries as a sequence of `(key, value)` pairs.
    pub fn to_seq(&self) -> Seq<(K, V)> {
        self.project(|key, value| (key.clone(), value.clone()))
    }

    /// Returns the entries as a `Vec` of `(key, value)` pairs.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.to_seq().to_vec()
    }

    /// Returns a copy of the underlying ordered entries.
    pub fn to_entries(&self) -> Entries<K, V> {
        (*self.entries()).clone()
    }

    /// Returns an iterator over clones of the entries.
    pub fn iter(&self) -> MapIter<K, V> {
        MapIter {
            entries: self.entries(),
            position: 0,
        }
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Transforms every entry into a new `(key, value)` pair.
    ///
    /// Pairs produced later overwrite earlier ones with the same key.
    pub fn map<K2, V2, F>(&self, mut function: F) -> Map<K2, V2>
    where
        K2: Eq + Hash + Clone + 'static,
        V2: Clone + 'static,
        F: FnMut(V, K) -> (K2, V2) + 'static,
    {
        self.transform(move |entries| {
            entries
                .iter()
                .map(|(key, value)| function(value.clone(), key.clone()))
                .collect()
        })
    }

    /// Transforms every value, keeping the keys.
    pub fn map_values<W, F>(&self, mut function: F) -> Map<K, W>
    where
        W: Clone + 'static,
        F: FnMut(V) -> W + 'static,
    {
        self.transform(move |entries| {
            entries
                .iter()
                .map(|(key, value)| (key.clone(), function(value.clone())))
                .collect()
        })
    }

    /// Keeps the entries that satisfy `predicate`.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &K) -> bool + 'static,
    {
        self.transform(move |entries| {
            entries
                .iter()
                .filter(|(key, value)| predicate(value, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
    }

    /// Drops the entries that satisfy `predicate`.
    pub fn filter_not<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V, &K) -> bool + 'static,
    {
        self.filter(move |value, key| !predicate(value, key))
    }

    /// Maps every entry to any number of pairs and merges them in order.
    pub fn flat_map<K2, V2, I, F>(&self, mut function: F) -> Map<K2, V2>
    where
        K2: Eq + Hash + Clone + 'static,
        V2: Clone + 'static,
        I: IntoIterator<Item = (K2, V2)>,
        F: FnMut(V, K) -> I + 'static,
    {
        self.transform(move |entries| {
            entries
                .iter()
                .flat_map(|(key, value)| function(value.clone(), key.clone()))
                .collect()
        })
    }

    /// Returns a map with `key` set to `value`.
    ///
    /// An existing key keeps its position.
    pub fn append(&self, key: K, value: V) -> Self {
        self.transform(move |entries| {
            let mut next = entries.clone();
            next.insert(key, value);
            next
        })
    }

    /// Returns a map with every pair of `overlay` set, in order.
    ///
    /// Existing keys keep their position and take the overlay's value.
    pub fn append_all<I>(&self, overlay: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let overlay: Vec<(K, V)> = overlay.into_iter().collect();
        self.transform(move |entries| {
            let mut next = entries.clone();
            next.extend(overlay);
            next
        })
    }

    /// Returns a map without `key`; the other entries keep their order.
    pub fn without(&self, key: &K) -> Self {
        let key = key.clone();
        self.transform(move |entries| {
            let mut next = entries.clone();
            next.shift_remove(&key);
            next
        })
    }

    /// Keeps the first `count` entries; empty when `count == 0`, unchanged
    /// when `count < 0`.
    ///
    /// On a lazy map the result stays deferred, but reading it runs the
    /// whole producer: unlike [`Seq::take`], this does not stop early.
    pub fn take(&self, count: isize) -> Self {
        let Ok(count) = usize::try_from(count) else {
            return self.clone();
        };
        if count == 0 {
            return Self::empty();
        }
        self.transform(move |entries| Window::Leading(count).select(entries))
    }

    /// Keeps the last `count` entries; empty when `count <= 0`.
    pub fn take_right(&self, count: isize) -> Self {
        match usize::try_from(count) {
            Ok(count) if count > 0 => {
                self.transform(move |entries| Window::Trailing(count).select(entries))
            }
            _ => Self::empty(),
        }
    }

    /// Skips the first `count` entries; unchanged when `count <= 0`.
    pub fn drop(&self, count: isize) -> Self {
        match usize::try_from(count) {
            Ok(count) if count > 0 => {
                self.transform(move |entries| Window::Skipping(count).select(entries))
            }
            _ => self.clone(),
        }
    }

    /// Groups the entries by the key `projector` derives from each one.
    ///
    /// Groups appear in order of their first entry. On a lazy map the
    /// grouping runs when the result is first read.
    pub fn group_by<G, F>(&self, projector: F) -> Map<G, Self>
    where
        G: Eq + Hash + Clone + 'static,
        F: FnMut(&V, &K) -> G + 'static,
    {
        self.transform(move |entries| {
            group_entries(entries, projector)
                .into_iter()
                .map(|(group, members)| (group, Self::from_entries(members)))
                .collect()
        })
    }

    // =========================================================================
    // Reductions
    // =========================================================================

    /// Folds the entries in iteration order.
    pub fn fold<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V, K) -> B,
    {
        self.iter()
            .fold(init, |accumulator, (key, value)| function(accumulator, value, key))
    }

    /// Returns the first entry that satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Maybe<(K, V)>
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.iter()
            .find(|(key, value)| predicate(value, key))
            .into()
    }

    /// Returns `true` if some entry satisfies `predicate`.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.entries().iter().any(|(key, value)| predicate(value, key))
    }

    /// Returns `true` if every entry satisfies `predicate`.
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.entries().iter().all(|(key, value)| predicate(value, key))
    }

    /// Counts the entries that satisfy `predicate`.
    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&V, &K) -> bool,
    {
        self.entries()
            .iter()
            .filter(|(key, value)| predicate(value, key))
            .count()
    }

    /// Calls `action` on every entry in order.
    pub fn each<F>(&self, mut action: F)
    where
        F: FnMut(V, K),
    {
        self.iter().for_each(|(key, value)| action(value, key));
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
        self.extreme_by("Map::max", |value, _| value.clone(), Ordering::Greater)
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
        self.extreme_by("Map::min", |value, _| value.clone(), Ordering::Less)
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
        self.extreme_by("Map::max_by", projector, Ordering::Greater)
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
        self.extreme_by("Map::min_by", projector, Ordering::Less)
    }

    fn extreme_by<O, F>(
        &self,
        operation: &'static str,
        projector: F,
        wanted: Ordering,
    ) -> Result<(K, V), CollectionError>
    where
        O: Ord,
        F: FnMut(&V, &K) -> O,
    {
        extreme_entry(&self.entries(), operation, projector, wanted)
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// An iterator over clones of the entries of a [`Map`].
pub struct MapIter<K, V> {
    entries: Rc<Entries<K, V>>,
    position: usize,
}

impl<K: Clone, V: Clone> Iterator for MapIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.get_index(self.position)?;
        self.position += 1;
        Some((key.clone(), value.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for MapIter<K, V> {}

impl<K, V> IntoIterator for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    type Item = (K, V);
    type IntoIter = MapIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for &Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    type Item = (K, V);
    type IntoIter = MapIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V> From<Entries<K, V>> for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn from(entries: Entries<K, V>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::empty()
    }
}

/// Maps are equal when they hold the same entries, in any order.
impl<K, V> PartialEq for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + PartialEq + 'static,
{
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.entries() == *other.entries()
    }
}

impl<K, V> Eq for Map<K, V>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + Eq + 'static,
{
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backing {
            MapBacking::Materialized(entries) => {
                formatter.write_str("Map ")?;
                formatter.debug_map().entries(entries.iter()).finish()
            }
            MapBacking::Deferred(memo) => formatter.debug_tuple("Map").field(memo).finish(),
        }
    }
}

impl<K, V, Q> Pick<Q> for Map<K, V>
where
    K: Eq + Hash + Clone + Borrow<Q> + 'static,
    V: Clone + 'static,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn pick(&self, name: &Q) -> Option<V> {
        self.get(name).to_option()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for Map<K, V>
where
    K: serde::Serialize + Eq + Hash + Clone + 'static,
    V: serde::Serialize + Clone + 'static,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for Map<K, V>
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

// =============================================================================
// Tests
// =============================================================================
