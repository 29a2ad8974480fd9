//! # scollections
//!
//! Scala-style collections for Rust: an optional value ([`Maybe`]), an
//! ordered sequence ([`Seq`]), an insertion-ordered map ([`Map`]) and its
//! in-place counterpart ([`MutableMap`]), all sharing one combinator API.
//!
//! ## Overview
//!
//! - **Eager and lazy backings**: `Seq` and `Map` are either materialized or
//!   backed by a producer. Both behave identically; the lazy form only runs
//!   work when a result is read, and never runs a producer twice.
//! - **Caching single-pass adapter**: [`CachedSource`] turns a one-shot
//!   iterator into a replayable source that pulls each element once.
//! - **Uniform access**: [`KeyedAccess`] for keyed reads and writes and
//!   [`Pick`] for extracting a named field from an element.
//! - **Type classes**: [`Foldable`] and [`TypeConstructor`].
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for every collection
//! - `json`: run-time checked operations over `serde_json::Value`
//! - `fxhash` / `ahash`: choose the hasher used by maps
//! - `full`: `serde` and `json`
//!
//! ## Example
//!
//! ```rust
//! use scollections::prelude::*;
//!
//! let cars = Seq::from_items([("Civic", "Honda"), ("Levorg", "Subaru"), ("Fit", "Honda")]);
//! let by_maker = cars.group_by(|(_, maker)| *maker);
//! assert_eq!(by_maker.keys().to_vec(), vec!["Honda", "Subaru"]);
//! assert_eq!(by_maker.at("Honda").map(|models| models.len()), Ok(2));
//!
//! let first_even = Seq::lazy(1..).find(|n| n % 2 == 0);
//! assert_eq!(first_even, Maybe::Some(2));
//! ```
//!
//! [`CachedSource`]: control::CachedSource
//! [`KeyedAccess`]: collection::KeyedAccess
//! [`Pick`]: pick::Pick
//! [`Foldable`]: typeclass::Foldable
//! [`TypeConstructor`]: typeclass::TypeConstructor

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::module_name_repetitions)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use scollections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{KeyedAccess, Map, MutableMap, Seq};
    pub use crate::error::CollectionError;
    pub use crate::maybe::Maybe;
    pub use crate::pick::{Pick, field};
    pub use crate::typeclass::{Foldable, TypeConstructor};
}

pub mod collection;
pub mod control;
pub mod error;
pub mod maybe;
pub mod pick;
pub mod typeclass;

#[cfg(feature = "json")]
pub mod json;

pub use collection::{Map, MutableMap, Seq};
pub use maybe::Maybe;
