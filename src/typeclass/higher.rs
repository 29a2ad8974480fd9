//! Type constructor emulation through Generic Associated Types.
//!
//! Rust cannot abstract over `Seq<_>` or `Maybe<_>` as type constructors
//! directly. [`TypeConstructor`] names the element type a collection is
//! currently applied to and the same collection applied to another type,
//! which is enough for [`Foldable`](super::Foldable) and for generic helpers
//! that change the element type.
//!
//! # Example
//!
//! ```rust
//! use scollections::collection::Seq;
//! use scollections::typeclass::TypeConstructor;
//!
//! fn blank<T: TypeConstructor>(_value: &T) -> T::WithType<String>
//! where
//!     T::WithType<String>: Default,
//! {
//!     Default::default()
//! }
//!
//! let numbers = Seq::from_items([1, 2, 3]);
//! let names: Seq<String> = blank(&numbers);
//! assert!(names.is_empty());
//! ```

use crate::collection::{Map, MutableMap, Seq};
use crate::maybe::Maybe;

/// A type constructor applied to an element type.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F` itself.
pub trait TypeConstructor {
    /// The element type the constructor is applied to.
    type Inner;

    /// The same constructor applied to `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Maybe<A> {
    type Inner = A;
    type WithType<B> = Maybe<B>;
}

impl<T> TypeConstructor for Seq<T> {
    type Inner = T;
    type WithType<B> = Seq<B>;
}

/// Maps are constructors over their value type; the key type is fixed.
impl<K, V> TypeConstructor for Map<K, V> {
    type Inner = V;
    type WithType<B> = Map<K, B>;
}

impl<K, V> TypeConstructor for MutableMap<K, V> {
    type Inner = V;
    type WithType<B> = MutableMap<K, B>;
}
