//! Sequences and maps with eager and lazy backings.
//!
//! This module provides the collection types of the crate:
//!
//! - [`Seq`]: an ordered sequence, either materialized or backed by a
//!   cached single-pass producer
//! - [`Map`]: an insertion-ordered map, either materialized or backed by a
//!   memoized producer of pairs
//! - [`MutableMap`]: an insertion-ordered map updated in place
//! - [`KeyedAccess`]: uniform keyed reads and writes over all three
//!
//! # Lazy Evaluation
//!
//! A lazy collection runs its producer at most once. Transformations of a
//! lazy collection are lazy as well, and a lazy sequence pulls only as many
//! elements as a read needs:
//!
//! ```rust
//! use scollections::collection::Seq;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let pulled = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pulled);
//! let naturals = Seq::lazy((0..).inspect(move |_| counter.set(counter.get() + 1)));
//!
//! let squares = naturals.map(|n| n * n).take(3);
//! assert_eq!(squares.to_vec(), vec![0, 1, 4]);
//! assert_eq!(squares.to_vec(), vec![0, 1, 4]);
//! assert_eq!(pulled.get(), 3);
//! ```
//!
//! # Sharing
//!
//! `Seq` and `Map` are persistent: cloning shares storage and every
//! operation returns a new collection. They use `Rc` internally and are
//! therefore neither `Send` nor `Sync`.

mod access;
mod map;
mod mutable_map;
mod seq;
mod shared;

pub use access::KeyedAccess;
pub use map::{Map, MapIter};
pub use mutable_map::MutableMap;
pub use seq::{Seq, SeqIter, Source};
pub use shared::{Entries, EntryHasher};
