//! Ordered sequences with interchangeable eager and lazy backings.
//!
//! A [`Seq<T>`] is either *materialized* (an `Rc<Vec<T>>` that is already in
//! memory) or *deferred* (a [`CachedSource`] wrapping a producer that has not
//! necessarily run yet). Both backings answer every operation identically;
//! the only observable difference is *when* work happens.
//!
//! - Transformations on a materialized sequence compute immediately.
//! - Transformations on a deferred sequence describe a new pull chain and
//!   pull nothing until a terminal operation (`to_vec`, `len`, `fold`, …)
//!   asks for elements.
//! - Every deferred sequence caches what it produced, so reading it again
//!   never re-runs its producer or its mapping functions.
//! - Operations that need the whole sequence (`sort_by`, `take_right`,
//!   `group_by`, `to_map`, …) are deferred as well on a lazy receiver; the
//!   source is pulled when the result is first read.
//!
//! Indices are always dense: after `filter`, `drop` or `distinct` the
//! surviving elements are numbered `0..n`.
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::Seq;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let yielded = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&yielded);
//! let numbers = Seq::lazy((1..=3).inspect(move |_| counter.set(counter.get() + 1)));
//!
//! assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
//! assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
//! assert_eq!(yielded.get(), 3);
//!
//! let names = Seq::from_items(["foo", "bar", "foo", "baz"]).distinct();
//! assert_eq!(names.to_vec(), vec!["foo", "bar", "baz"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use super::map::Map;
use super::shared::{Entries, SeenSet, shared_empty};
use crate::control::{CachedSource, Cursor, Memo};
use crate::error::CollectionError;
use crate::maybe::Maybe;
use crate::pick::Pick;

/// The inputs a sequence can be built from with [`Seq::from_source`].
pub enum Source<T> {
    /// No input; produces the shared empty sequence.
    Empty,
    /// A finished list of elements; produces an eager sequence.
    Materialized(Vec<T>),
    /// A single-pass producer; produces a lazy sequence.
    Deferred(Box<dyn Iterator<Item = T>>),
}

impl<T> Source<T> {
    /// Wraps a single-pass producer.
    pub fn deferred<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::Deferred(Box::new(iterable.into_iter()))
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::Materialized(elements)
    }
}

impl<T, S: Into<Source<T>>> From<Option<S>> for Source<T> {
    fn from(source: Option<S>) -> Self {
        source.map_or(Self::Empty, Into::into)
    }
}

enum Backing<T> {
    Materialized(Rc<Vec<T>>),
    Deferred(Rc<CachedSource<T>>),
}

impl<T> Clone for Backing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Materialized(elements) => Self::Materialized(Rc::clone(elements)),
            Self::Deferred(source) => Self::Deferred(Rc::clone(source)),
        }
    }
}

/// An ordered, duplicate-permitting sequence.
///
/// Cloning a `Seq` is cheap: clones share the same backing storage and, for
/// lazy sequences, the same cache.
///
/// # Thread Safety
///
/// `Seq` is reference counted with `Rc` and is therefore neither `Send` nor
/// `Sync`.
pub struct Seq<T> {
    backing: Backing<T>,
}

static_assertions::assert_not_impl_any!(Seq<i32>: Send, Sync);
static_assertions::assert_impl_all!(Seq<String>: Clone, PartialEq, Default);

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Creates an eager sequence that takes ownership of `elements`.
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self {
            backing: Backing::Materialized(Rc::new(elements)),
        }
    }

    /// Creates an eager sequence from the given items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    ///
    /// assert_eq!(Seq::from_items([1, 9, 2, 8, 3]).max(), Ok(9));
    /// ```
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(items.into_iter().collect())
    }

    /// Creates a lazy sequence over a single-pass producer.
    ///
    /// The producer is advanced only when elements are requested and never
    /// more than once per element.
    pub fn lazy<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            backing: Backing::Deferred(Rc::new(CachedSource::new(iterable))),
        }
    }

    /// Creates a lazy sequence from a producer factory.
    ///
    /// `factory` is called once, when the first element is requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    ///
    /// let squares = Seq::from_fn(|| (1..).map(|value: u64| value * value));
    /// assert_eq!(squares.take(4).to_vec(), vec![1, 4, 9, 16]);
    /// ```
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            backing: Backing::Deferred(Rc::new(CachedSource::deferred(factory))),
        }
    }

    /// Creates a sequence from an optional source.
    ///
    /// `None` and [`Source::Empty`] yield the shared empty sequence, a `Vec`
    /// yields an eager sequence and [`Source::Deferred`] a lazy one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::{Seq, Source};
    ///
    /// let missing: Option<Vec<i32>> = None;
    /// assert!(Seq::ptr_eq(&Seq::from_source(missing), &Seq::empty()));
    /// assert_eq!(Seq::from_source(Some(vec![1, 2])).to_vec(), vec![1, 2]);
    /// assert_eq!(Seq::from_source(Source::deferred(0..3)).len(), 3);
    /// ```
    pub fn from_source<S>(source: S) -> Self
    where
        S: Into<Source<T>>,
    {
        match source.into() {
            Source::Empty => Self::empty(),
            Source::Materialized(elements) => Self::from_vec(elements),
            Source::Deferred(producer) => Self::lazy(producer),
        }
    }

    /// Returns the shared empty sequence.
    ///
    /// Every call on a thread returns a clone of the same instance, so
    /// [`Seq::ptr_eq`] holds between any two results.
    pub fn empty() -> Self {
        shared_empty(|| Self::from_vec(Vec::new()))
    }
}

impl<T> Seq<T> {
    /// Returns `true` if both sequences share the same backing storage.
    pub fn ptr_eq(left: &Self, right: &Self) -> bool {
        match (&left.backing, &right.backing) {
            (Backing::Materialized(left), Backing::Materialized(right)) => Rc::ptr_eq(left, right),
            (Backing::Deferred(left), Backing::Deferred(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns `true` if the sequence is backed by an in-memory list.
    pub const fn is_computed(&self) -> bool {
        matches!(self.backing, Backing::Materialized(_))
    }
}

// =============================================================================
// Inspection and Materialization
// =============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Returns an iterator over clones of the elements.
    ///
    /// Iterating a lazy sequence pulls from its producer as needed.
    pub fn iter(&self) -> SeqIter<T> {
        let inner = match &self.backing {
            Backing::Materialized(elements) => IterInner::Materialized {
                elements: Rc::clone(elements),
                position: 0,
            },
            Backing::Deferred(source) => IterInner::Deferred(CachedSource::cursor(source)),
        };
        SeqIter { inner }
    }

    /// Applies `pipeline` to the element stream: immediately for an eager
    /// receiver, on demand for a lazy one.
    fn transform<U, I, F>(&self, pipeline: F) -> Seq<U>
    where
        U: Clone + 'static,
        I: Iterator<Item = U> + 'static,
        F: FnOnce(SeqIter<T>) -> I,
    {
        let elements = pipeline(self.iter());
        if self.is_computed() {
            Seq::from_vec(elements.collect())
        } else {
            Seq::lazy(elements)
        }
    }

    /// Rebuilds the full element list with `build`: immediately for an
    /// eager receiver, on first read of the result for a lazy one.
    fn rebuild<U, F>(&self, build: F) -> Seq<U>
    where
        U: Clone + 'static,
        F: FnOnce(Vec<T>) -> Vec<U> + 'static,
    {
        if self.is_computed() {
            Seq::from_vec(build(self.to_vec()))
        } else {
            let parent = self.clone();
            Seq::from_fn(move || build(parent.to_vec()))
        }
    }

    /// Collects the elements into map entries with `build`: immediately for
    /// an eager receiver, on first read of the map for a lazy one.
    fn collect_map<K, V, F>(&self, build: F) -> Map<K, V>
    where
        K: Eq + Hash + Clone + 'static,
        V: Clone + 'static,
        F: FnOnce(SeqIter<T>) -> Entries<K, V> + 'static,
    {
        if self.is_computed() {
            Map::from_entries(build(self.iter()))
        } else {
            let parent = self.clone();
            Map::deferred(move || build(parent.iter()))
        }
    }

    /// Returns the number of elements, evaluating a lazy sequence fully.
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Materialized(elements) => elements.len(),
            Backing::Deferred(source) => {
                source.fill();
                source.cached_len()
            }
        }
    }

    /// Returns `true` if the sequence has no elements.
    ///
    /// A lazy sequence pulls at most one element to answer.
    pub fn is_empty(&self) -> bool {
        match &self.backing {
            Backing::Materialized(elements) => elements.is_empty(),
            Backing::Deferred(source) => source.get(0).is_none(),
        }
    }

    /// Returns `true` if the sequence has at least one element.
    pub fn non_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the elements as a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        match &self.backing {
            Backing::Materialized(elements) => (**elements).clone(),
            Backing::Deferred(source) => source.to_vec(),
        }
    }

    /// Returns an eager sequence with the same elements.
    ///
    /// An eager receiver is returned as is, sharing its storage.
    pub fn computed(&self) -> Self {
        match &self.backing {
            Backing::Materialized(_) => self.clone(),
            Backing::Deferred(source) => {
                log::debug!("materializing deferred Seq");
                Self::from_vec(source.to_vec())
            }
        }
    }

    /// Returns the element at `index`, if any.
    ///
    /// A lazy sequence pulls only as far as `index`.
    pub fn get(&self, index: usize) -> Maybe<T> {
        match &self.backing {
            Backing::Materialized(elements) => elements.get(index).cloned().into(),
            Backing::Deferred(source) => source.get(index).into(),
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] if `index` is not below
    /// the length of the sequence.
    pub fn at(&self, index: usize) -> Result<T, CollectionError> {
        match self.get(index) {
            Maybe::Some(element) => Ok(element),
            Maybe::None => Err(CollectionError::IndexOutOfRange {
                index,
                length: self.len(),
            }),
        }
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn head(&self) -> Result<T, CollectionError> {
        self.head_option().get_or_err(CollectionError::EmptyCollection {
            operation: "Seq::head",
        })
    }

    /// Returns the first element, if any.
    pub fn head_option(&self) -> Maybe<T> {
        self.get(0)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn last(&self) -> Result<T, CollectionError> {
        self.last_option().get_or_err(CollectionError::EmptyCollection {
            operation: "Seq::last",
        })
    }

    /// Returns the last element, if any.
    pub fn last_option(&self) -> Maybe<T> {
        match &self.backing {
            Backing::Materialized(elements) => elements.last().cloned().into(),
            Backing::Deferred(_) => self.iter().last().into(),
        }
    }

    /// Returns the position of the first element equal to `target`.
    pub fn index_of(&self, target: &T) -> Maybe<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == *target).into()
    }

    /// Returns `true` if some element equals `target`.
    pub fn contains(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == *target)
    }
}

// =============================================================================
// Transformations
// =============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Transforms every element.
    pub fn map<U, F>(&self, function: F) -> Seq<U>
    where
        U: Clone + 'static,
        F: FnMut(T) -> U + 'static,
    {
        self.transform(move |elements| elements.map(function))
    }

    /// Keeps the elements that satisfy `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.transform(move |elements| elements.filter(predicate))
    }

    /// Drops the elements that satisfy `predicate`.
    pub fn filter_not<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.transform(move |elements| elements.filter(move |element| !predicate(element)))
    }

    /// Maps every element to an iterable and concatenates the results in
    /// source order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    ///
    /// let words = Seq::from_items(["a b", "c"]);
    /// let letters = words.flat_map(|line| line.split(' ').collect::<Vec<_>>());
    /// assert_eq!(letters.to_vec(), vec!["a", "b", "c"]);
    /// ```
    pub fn flat_map<U, I, F>(&self, function: F) -> Seq<U>
    where
        U: Clone + 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: FnMut(T) -> I + 'static,
    {
        self.transform(move |elements| elements.flat_map(function))
    }

    /// Concatenates nested iterables one level deep.
    pub fn flatten(&self) -> Seq<T::Item>
    where
        T: IntoIterator,
        T::Item: Clone + 'static,
        T::IntoIter: 'static,
    {
        self.transform(|elements| elements.flatten())
    }

    /// Removes repeated elements, keeping the first occurrence.
    pub fn distinct(&self) -> Self
    where
        T: Eq + Hash,
    {
        self.distinct_by(T::clone)
    }

    /// Removes elements whose projected key was already seen, keeping the
    /// first occurrence.
    pub fn distinct_by<K, F>(&self, mut projector: F) -> Self
    where
        K: Eq + Hash + 'static,
        F: FnMut(&T) -> K + 'static,
    {
        self.transform(move |elements| {
            let mut seen: SeenSet<K> = SeenSet::default();
            elements.filter(move |element| seen.insert(projector(element)))
        })
    }

    /// Appends the elements of `other`.
    pub fn append<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let tail = other.into_iter();
        self.transform(move |elements| elements.chain(tail))
    }

    /// Prepends the elements of `other`.
    pub fn prepend<I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let front = other.into_iter();
        self.transform(move |elements| front.chain(elements))
    }

    /// Appends a single element.
    pub fn append_element(&self, element: T) -> Self {
        self.append(std::iter::once(element))
    }

    /// Prepends a single element.
    pub fn prepend_element(&self, element: T) -> Self {
        self.prepend(std::iter::once(element))
    }

    /// Reverses the order of the elements.
    ///
    /// Always produces an eager sequence.
    pub fn reverse(&self) -> Self {
        let mut elements = self.to_vec();
        elements.reverse();
        Self::from_vec(elements)
    }

    /// Sorts the elements in ascending order. The sort is stable.
    pub fn sorted(&self) -> Self
    where
        T: Ord,
    {
        self.rebuild(|mut elements| {
            elements.sort();
            elements
        })
    }

    /// Sorts the elements by the key `projector` derives from each one.
    ///
    /// The sort is stable: elements with equal keys keep their relative
    /// order. The projector is called once per element.
    pub fn sort_by<K, F>(&self, projector: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K + 'static,
    {
        self.rebuild(move |mut elements| {
            elements.sort_by_cached_key(projector);
            elements
        })
    }

    /// Sorts the elements by their field `name`. The sort is stable.
    ///
    /// Every element is checked for the field before this returns, so a lazy
    /// sequence is evaluated in full. Use [`Seq::sort_by`] with
    /// [`field`](crate::pick::field) to keep the result deferred.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::MissingKey`] if an element has no field
    /// `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    /// use std::collections::HashMap;
    ///
    /// let people = Seq::from_items([
    ///     HashMap::from([("name", "Carol")]),
    ///     HashMap::from([("name", "Alice")]),
    /// ]);
    /// let names = people.sort_by_field("name").unwrap().map(|person| person["name"]);
    /// assert_eq!(names.to_vec(), vec!["Alice", "Carol"]);
    /// ```
    pub fn sort_by_field<Q>(&self, name: &Q) -> Result<Self, CollectionError>
    where
        T: Pick<Q>,
        T::Output: Ord,
        Q: fmt::Debug + ?Sized,
    {
        let mut keyed = self.keyed_by_field(name)?;
        keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
        Ok(Self::from_vec(
            keyed.into_iter().map(|(_, element)| element).collect(),
        ))
    }

    fn keyed_by_field<Q>(&self, name: &Q) -> Result<Vec<(T::Output, T)>, CollectionError>
    where
        T: Pick<Q>,
        Q: fmt::Debug + ?Sized,
    {
        self.iter()
            .map(|element| match element.pick(name) {
                Some(key) => Ok((key, element)),
                None => Err(CollectionError::missing_key(name)),
            })
            .collect()
    }

    /// Keeps the first `count` elements.
    ///
    /// `take(0)` is empty and a negative `count` returns the sequence
    /// unchanged. On a lazy sequence the producer is never pulled past
    /// `count` elements.
    pub fn take(&self, count: isize) -> Self {
        let Ok(count) = usize::try_from(count) else {
            return self.clone();
        };
        if count == 0 {
            return Self::empty();
        }
        self.transform(move |elements| elements.take(count))
    }

    /// Keeps the last `count` elements; empty when `count <= 0`.
    pub fn take_right(&self, count: isize) -> Self {
        match usize::try_from(count) {
            Ok(count) if count > 0 => self.rebuild(move |mut elements| {
                let start = elements.len().saturating_sub(count);
                elements.split_off(start)
            }),
            _ => Self::empty(),
        }
    }

    /// Keeps the leading elements that satisfy `predicate`.
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.transform(move |elements| elements.take_while(predicate))
    }

    /// Skips the first `count` elements; unchanged when `count <= 0`.
    pub fn drop(&self, count: isize) -> Self {
        match usize::try_from(count) {
            Ok(count) if count > 0 => self.transform(move |elements| elements.skip(count)),
            _ => self.clone(),
        }
    }

    /// Skips the last `count` elements; unchanged when `count <= 0`.
    pub fn drop_right(&self, count: isize) -> Self {
        match usize::try_from(count) {
            Ok(count) if count > 0 => self.rebuild(move |mut elements| {
                elements.truncate(elements.len().saturating_sub(count));
                elements
            }),
            _ => self.clone(),
        }
    }

    /// Skips the leading elements that satisfy `predicate`.
    pub fn drop_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool + 'static,
    {
        self.transform(move |elements| elements.skip_while(predicate))
    }

    /// Splits the sequence into the elements that satisfy `predicate` and
    /// those that do not.
    ///
    /// On a lazy sequence both halves are deferred and share one pass over
    /// the source: `predicate` runs once per element.
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&T) -> bool + 'static,
    {
        if self.is_computed() {
            let (matching, rest): (Vec<T>, Vec<T>) = self.iter().partition(|element| predicate(element));
            return (Self::from_vec(matching), Self::from_vec(rest));
        }
        let parent = self.clone();
        let split: Rc<Memo<(Vec<T>, Vec<T>)>> = Rc::new(Memo::new(move || {
            parent.iter().partition(|element| predicate(element))
        }));
        let matching = Rc::clone(&split);
        (
            Self::from_fn(move || matching.force().0.clone()),
            Self::from_fn(move || split.force().1.clone()),
        )
    }
}

// =============================================================================
// Reductions
// =============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Folds the elements from left to right.
    pub fn fold<B, F>(&self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.iter().fold(init, function)
    }

    /// Folds the elements using the first one as the initial accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn reduce<F>(&self, function: F) -> Result<T, CollectionError>
    where
        F: FnMut(T, T) -> T,
    {
        self.iter()
            .reduce(function)
            .ok_or(CollectionError::EmptyCollection {
                operation: "Seq::reduce",
            })
    }

    /// Returns the first element that satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Maybe<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|element| predicate(element)).into()
    }

    /// Returns `true` if some element satisfies `predicate`.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().any(|element| predicate(&element))
    }

    /// Returns `true` if every element satisfies `predicate`.
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().all(|element| predicate(&element))
    }

    /// Counts the elements that satisfy `predicate`.
    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|element| predicate(element)).count()
    }

    /// Calls `action` on every element in order.
    pub fn each<F>(&self, action: F)
    where
        F: FnMut(T),
    {
        self.iter().for_each(action);
    }

    /// Returns the sum of the elements.
    pub fn sum(&self) -> T
    where
        T: std::iter::Sum,
    {
        self.iter().sum()
    }

    /// Renders the elements separated by `separator`.
    pub fn mk_string(&self, separator: &str) -> String
    where
        T: fmt::Display,
    {
        self.iter()
            .map(|element| element.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Returns the greatest element; the first one wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn max(&self) -> Result<T, CollectionError>
    where
        T: Ord,
    {
        self.extreme_by("Seq::max", T::clone, Ordering::Greater)
    }

    /// Returns the smallest element; the first one wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn min(&self) -> Result<T, CollectionError>
    where
        T: Ord,
    {
        self.extreme_by("Seq::min", T::clone, Ordering::Less)
    }

    /// Returns the element with the greatest projected key; the first one
    /// wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn max_by<K, F>(&self, projector: F) -> Result<T, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.extreme_by("Seq::max_by", projector, Ordering::Greater)
    }

    /// Returns the element with the smallest projected key; the first one
    /// wins a tie.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] on an empty sequence.
    pub fn min_by<K, F>(&self, projector: F) -> Result<T, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.extreme_by("Seq::min_by", projector, Ordering::Less)
    }

    fn extreme_by<K, F>(
        &self,
        operation: &'static str,
        mut projector: F,
        wanted: Ordering,
    ) -> Result<T, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut best: Option<(K, T)> = None;
        for element in self.iter() {
            let key = projector(&element);
            // Strict comparison keeps the first of equal candidates.
            let replace = best
                .as_ref()
                .is_none_or(|(best_key, _)| key.cmp(best_key) == wanted);
            if replace {
                best = Some((key, element));
            }
        }
        best.map(|(_, element)| element)
            .ok_or(CollectionError::EmptyCollection { operation })
    }
}

// =============================================================================
// Conversions to Map
// =============================================================================

impl<T: Clone + 'static> Seq<T> {
    /// Groups the elements by the key `projector` derives from each one.
    ///
    /// Groups appear in order of their first element and keep the source
    /// order of their members.
    pub fn group_by<K, F>(&self, mut projector: F) -> Map<K, Self>
    where
        K: Eq + Hash + Clone + 'static,
        F: FnMut(&T) -> K + 'static,
    {
        self.collect_map(move |elements| {
            Self::group_entries(elements.map(|element| (projector(&element), element)))
        })
    }

    /// Groups the elements by their field `name`.
    ///
    /// Like [`Seq::sort_by_field`], this checks every element before it
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::MissingKey`] if an element has no field
    /// `name`.
    pub fn group_by_field<Q>(&self, name: &Q) -> Result<Map<T::Output, Self>, CollectionError>
    where
        T: Pick<Q>,
        T::Output: Eq + Hash + Clone + 'static,
        Q: fmt::Debug + ?Sized,
    {
        Ok(Map::from_entries(Self::group_entries(self.keyed_by_field(name)?)))
    }

    fn group_entries<K, I>(keyed: I) -> Entries<K, Self>
    where
        K: Eq + Hash,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut groups: Entries<K, Vec<T>> = Entries::default();
        for (key, element) in keyed {
            groups.entry(key).or_default().push(element);
        }
        groups
            .into_iter()
            .map(|(key, members)| (key, Self::from_vec(members)))
            .collect()
    }

    /// Builds a map from the key `projector` derives from each element to
    /// the element. The last element wins a key collision.
    pub fn to_map<K, F>(&self, mut projector: F) -> Map<K, T>
    where
        K: Eq + Hash + Clone + 'static,
        F: FnMut(&T) -> K + 'static,
    {
        self.collect_map(move |elements| {
            elements
                .map(|element| (projector(&element), element))
                .collect()
        })
    }

    /// Builds a map keyed by each element's field `name`. The last element
    /// wins a key collision. Every element is checked before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::MissingKey`] if an element has no field
    /// `name`.
    pub fn to_map_by_field<Q>(&self, name: &Q) -> Result<Map<T::Output, T>, CollectionError>
    where
        T: Pick<Q>,
        T::Output: Eq + Hash + Clone + 'static,
        Q: fmt::Debug + ?Sized,
    {
        Ok(Map::from_entries(self.keyed_by_field(name)?.into_iter().collect()))
    }
}

impl<K, V> Seq<(K, V)>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    /// Builds a map from a sequence of key/value pairs. The last pair wins a
    /// key collision.
    pub fn to_map_from_pairs(&self) -> Map<K, V> {
        self.collect_map(|pairs| pairs.collect())
    }
}

impl<T, E> Seq<Result<T, E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Turns a sequence of results into a result of a sequence.
    ///
    /// Elements are pulled in order and the first error is returned; on a
    /// lazy sequence, elements after it are never evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first `Err` element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::collection::Seq;
    ///
    /// let parsed = Seq::lazy(vec!["1", "2", "x"]).map(|text| text.parse::<i32>());
    /// assert_eq!(parsed.take(2).sequence().map(|numbers| numbers.to_vec()), Ok(vec![1, 2]));
    /// assert!(parsed.sequence().is_err());
    /// ```
    pub fn sequence(&self) -> Result<Seq<T>, E> {
        self.iter().collect::<Result<Vec<T>, E>>().map(Seq::from_vec)
    }
}

// =============================================================================
// Iteration
// =============================================================================

enum IterInner<T> {
    Materialized { elements: Rc<Vec<T>>, position: usize },
    Deferred(Cursor<T>),
}

/// An iterator over clones of the elements of a [`Seq`].
///
/// The iterator owns a reference to the sequence's storage, so it stays
/// valid after the sequence itself is dropped.
pub struct SeqIter<T> {
    inner: IterInner<T>,
}

impl<T: Clone> Iterator for SeqIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Materialized { elements, position } => {
                let element = elements.get(*position).cloned()?;
                *position += 1;
                Some(element)
            }
            IterInner::Deferred(cursor) => cursor.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Materialized { elements, position } => {
                let remaining = elements.len().saturating_sub(*position);
                (remaining, Some(remaining))
            }
            IterInner::Deferred(cursor) => cursor.size_hint(),
        }
    }
}

impl<T: Clone + 'static> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = SeqIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for &Seq<T> {
    type Item = T;
    type IntoIter = SeqIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T: Clone + 'static> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Seq<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: Clone + 'static> Default for Seq<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + PartialEq + 'static> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq + 'static> Eq for Seq<T> {}

impl<T: fmt::Debug> fmt::Debug for Seq<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.backing {
            Backing::Materialized(elements) => {
                formatter.debug_tuple("Seq").field(&**elements).finish()
            }
            Backing::Deferred(source) => formatter.debug_tuple("Seq").field(source).finish(),
        }
    }
}

impl<T: Clone + fmt::Display + 'static> fmt::Display for Seq<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Seq({})", self.mk_string(", "))
    }
}

impl<T: Clone + 'static> Pick<usize> for Seq<T> {
    type Output = T;

    fn pick(&self, index: &usize) -> Option<T> {
        self.get(*index).to_option()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize + Clone + 'static> serde::Serialize for Seq<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let length = match &self.backing {
            Backing::Materialized(elements) => Some(elements.len()),
            Backing::Deferred(_) => None,
        };
        let mut sequence = serializer.serialize_seq(length)?;
        for element in self.iter() {
            sequence.serialize_element(&element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Seq<T>
where
    T: serde::Deserialize<'de> + Clone + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<T> as serde::Deserialize>::deserialize(deserializer).map(Self::from_vec)
    }
}

// =============================================================================
// Tests
// =============================================================================
