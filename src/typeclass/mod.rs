//! Type class traits over the collection types.
//!
//! - [`TypeConstructor`]: emulation of higher-kinded types through Generic
//!   Associated Types
//! - [`Foldable`]: folding a structure into a summary value
//!
//! [`Maybe`](crate::maybe::Maybe), [`Seq`](crate::collection::Seq),
//! [`Map`](crate::collection::Map) and
//! [`MutableMap`](crate::collection::MutableMap) implement both; the maps
//! are constructors over their value type.

mod foldable;
mod higher;

pub use foldable::Foldable;
pub use higher::TypeConstructor;
