//! Uniform keyed access over every collection.
//!
//! [`KeyedAccess`] lets generic code read, test for keys and (where the collection
//! allows it) update a collection by key without knowing its concrete type.
//! Sequences are keyed by position, maps by key. Only [`MutableMap`] accepts
//! writes; the persistent collections report
//! [`CollectionError::UnsupportedOperation`].
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::{KeyedAccess, Map, MutableMap};
//!
//! fn bump<C: KeyedAccess<&'static str, Value = i32>>(collection: &mut C) -> bool {
//!     let current = collection.read(&"hits").unwrap_or(0);
//!     collection.write("hits", current + 1).is_ok()
//! }
//!
//! let mut counters = MutableMap::from_pairs([("hits", 1)]);
//! assert!(bump(&mut counters));
//! assert_eq!(counters.get("hits").to_option(), Some(2));
//!
//! let mut frozen = Map::from_pairs([("hits", 1)]);
//! assert!(!bump(&mut frozen));
//! ```

use std::fmt;
use std::hash::Hash;

use super::map::Map;
use super::mutable_map::MutableMap;
use super::seq::Seq;
use crate::error::CollectionError;
use crate::maybe::Maybe;

/// Keyed reads and optional keyed writes.
pub trait KeyedAccess<K> {
    /// The type of the stored values.
    type Value;

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when `key` is absent: [`CollectionError::MissingKey`]
    /// for maps and [`CollectionError::IndexOutOfRange`] for sequences.
    fn read(&self, key: &K) -> Result<Self::Value, CollectionError>;

    /// Returns `true` if `key` is present.
    fn has(&self, key: &K) -> bool;

    /// Stores `value` under `key` and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnsupportedOperation`] unless the
    /// collection is updated in place.
    fn write(&mut self, key: K, value: Self::Value) -> Result<Maybe<Self::Value>, CollectionError> {
        let _ = (key, value);
        Err(CollectionError::UnsupportedOperation {
            operation: "write",
            collection: std::any::type_name::<Self>(),
        })
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnsupportedOperation`] unless the
    /// collection is updated in place.
    fn delete(&mut self, key: &K) -> Result<Maybe<Self::Value>, CollectionError> {
        let _ = key;
        Err(CollectionError::UnsupportedOperation {
            operation: "delete",
            collection: std::any::type_name::<Self>(),
        })
    }
}

impl<T: Clone + 'static> KeyedAccess<usize> for Seq<T> {
    type Value = T;

    fn read(&self, key: &usize) -> Result<T, CollectionError> {
        self.at(*key)
    }

    fn has(&self, key: &usize) -> bool {
        self.get(*key).is_some()
    }
}

impl<K, V> KeyedAccess<K> for Map<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + 'static,
{
    type Value = V;

    fn read(&self, key: &K) -> Result<V, CollectionError> {
        self.at(key)
    }

    fn has(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<K, V> KeyedAccess<K> for MutableMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + 'static,
{
    type Value = V;

    fn read(&self, key: &K) -> Result<V, CollectionError> {
        self.at(key)
    }

    fn has(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn write(&mut self, key: K, value: V) -> Result<Maybe<V>, CollectionError> {
        Ok(self.update(key, value))
    }

    fn delete(&mut self, key: &K) -> Result<Maybe<V>, CollectionError> {
        Ok(self.remove(key))
    }
}
