//! Error types for collection operations.
//!
//! Every fallible operation in this crate reports a [`CollectionError`].
//! The variants mirror the kinds of failure a caller can observe:
//! reading from an empty collection, projecting a key that does not exist,
//! a mapping function producing a value of the wrong shape, and so on.
//!
//! # Examples
//!
//! ```rust
//! use scollections::error::CollectionError;
//! use scollections::collection::Seq;
//!
//! let empty: Seq<i32> = Seq::empty();
//! assert_eq!(
//!     empty.max(),
//!     Err(CollectionError::EmptyCollection { operation: "Seq::max" })
//! );
//! ```

/// Represents errors that can occur while operating on collections.
///
/// Errors are raised synchronously at the point of detection. For lazy
/// collections this is the moment the offending element is pulled by a
/// terminal operation, so elements that are never pulled never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A value was requested from a collection (or `Maybe`) with no elements.
    #[error("{operation}: the collection is empty")]
    EmptyCollection {
        /// The operation that required at least one element.
        operation: &'static str,
    },

    /// A keyed read or a named projector found no matching key.
    #[error("missing key {key}")]
    MissingKey {
        /// The debug rendering of the key that was not found.
        key: String,
    },

    /// A mapping function returned a value of the wrong shape.
    #[error("{operation}: invalid mapping result, expected {expected}")]
    InvalidMapping {
        /// The operation whose mapping function misbehaved.
        operation: &'static str,
        /// A description of the shape that was expected.
        expected: &'static str,
    },

    /// A constructor received a value it cannot build a collection from.
    #[error("invalid argument: expected {expected}, found {found}")]
    InvalidArgument {
        /// A description of the accepted inputs.
        expected: &'static str,
        /// A description of the input that was received.
        found: String,
    },

    /// The operation is deliberately not offered by this collection.
    #[error("{operation} is not supported by {collection}")]
    UnsupportedOperation {
        /// The rejected operation.
        operation: &'static str,
        /// The collection type that rejected it.
        collection: &'static str,
    },

    /// A positional read beyond the end of a sequence.
    #[error("index {index} is out of range for a sequence of length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the sequence at the time of the read.
        length: usize,
    },

    /// A function passed to `flat_map` on an optional value did not return
    /// an optional value.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// A description of the expected type.
        expected: &'static str,
        /// A description of the type that was received.
        found: String,
    },
}

impl CollectionError {
    /// Builds a [`CollectionError::MissingKey`] from any debuggable key.
    pub(crate) fn missing_key<Q: std::fmt::Debug + ?Sized>(key: &Q) -> Self {
        Self::MissingKey {
            key: format!("{key:?}"),
        }
    }
}
