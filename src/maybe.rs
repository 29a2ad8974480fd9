//! Optional values with a Scala-style combinator API.
//!
//! [`Maybe<T>`] holds either exactly one value ([`Maybe::Some`]) or nothing
//! ([`Maybe::None`]). It converts freely to and from [`Option`], and adds
//! the operations collections in this crate build on: `get_or_call`,
//! `or_else_call`, `pick`, `to_seq` and friends.
//!
//! A `Some` may hold any value, including one a caller considers "empty";
//! only [`Maybe::from_value`] turns a sentinel into `None`.
//!
//! # Examples
//!
//! ```rust
//! use scollections::maybe::Maybe;
//!
//! let filtered = Maybe::some(5).filter(|value| *value > 10);
//! assert_eq!(filtered, Maybe::None);
//!
//! let fallback: Maybe<i32> = Maybe::none();
//! assert_eq!(fallback.get_or_else(42), 42);
//! ```

use std::fmt;

use crate::collection::Seq;
use crate::error::CollectionError;
use crate::pick::Pick;

/// A container holding zero or one value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Maybe<T> {
    /// A present value.
    Some(T),
    /// No value.
    None,
}

impl<T> Maybe<T> {
    /// Wraps a value.
    pub const fn some(value: T) -> Self {
        Self::Some(value)
    }

    /// Returns the empty value.
    pub const fn none() -> Self {
        Self::None
    }

    /// Wraps `value` unless it equals `none_sentinel`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::maybe::Maybe;
    ///
    /// assert_eq!(Maybe::from_value(0, &0), Maybe::None);
    /// assert_eq!(Maybe::from_value(7, &0), Maybe::Some(7));
    /// ```
    pub fn from_value(value: T, none_sentinel: &T) -> Self
    where
        T: PartialEq,
    {
        if value == *none_sentinel {
            Self::None
        } else {
            Self::Some(value)
        }
    }

    /// Projects the field `name` out of `container`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::maybe::Maybe;
    /// use std::collections::HashMap;
    ///
    /// let person = HashMap::from([("name".to_string(), "Alice")]);
    /// assert_eq!(Maybe::from_field(&person, "name"), Maybe::Some("Alice"));
    /// assert_eq!(Maybe::from_field(&person, "age"), Maybe::None);
    /// ```
    pub fn from_field<C, Q>(container: &C, name: &Q) -> Self
    where
        C: Pick<Q, Output = T> + ?Sized,
        Q: ?Sized,
    {
        container.pick(name).into()
    }

    /// Returns `true` if a value is present.
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns `true` if no value is present.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Converts `&Maybe<T>` into `Maybe<&T>`.
    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Some(value) => Maybe::Some(value),
            Self::None => Maybe::None,
        }
    }

    /// Transforms the value, if any.
    pub fn map<U, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Some(value) => Maybe::Some(function(value)),
            Self::None => Maybe::None,
        }
    }

    /// Transforms the value with a function that itself returns an optional
    /// value (`Maybe` or `Option`), flattening the result.
    pub fn flat_map<U, R, F>(self, function: F) -> Maybe<U>
    where
        F: FnOnce(T) -> R,
        R: Into<Maybe<U>>,
    {
        match self {
            Self::Some(value) => function(value).into(),
            Self::None => Maybe::None,
        }
    }

    /// Keeps the value only if it satisfies `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => {
                if predicate(&value) {
                    Self::Some(value)
                } else {
                    Self::None
                }
            }
            Self::None => Self::None,
        }
    }

    /// Keeps the value only if it does not satisfy `predicate`.
    pub fn filter_not<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.filter(|value| !predicate(value))
    }

    /// Returns the value.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if no value is present.
    pub fn get(self) -> Result<T, CollectionError> {
        self.get_or_err(CollectionError::EmptyCollection {
            operation: "Maybe::get",
        })
    }

    /// Returns the value, or the caller supplied `error`.
    ///
    /// # Errors
    ///
    /// Returns `error` if no value is present.
    pub fn get_or_err<E>(self, error: E) -> Result<T, E> {
        match self {
            Self::Some(value) => Ok(value),
            Self::None => Err(error),
        }
    }

    /// Returns the value, or `default` if none is present.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => default,
        }
    }

    /// Returns the value, or calls `supplier` if none is present.
    ///
    /// `supplier` is never called when a value is present.
    pub fn get_or_call<F>(self, supplier: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Some(value) => value,
            Self::None => supplier(),
        }
    }

    /// Returns `self` if a value is present, otherwise `alternative`.
    pub fn or_else(self, alternative: Self) -> Self {
        match self {
            Self::Some(_) => self,
            Self::None => alternative,
        }
    }

    /// Returns `self` if a value is present, otherwise the result of
    /// `supplier`.
    pub fn or_else_call<F>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Some(_) => self,
            Self::None => supplier(),
        }
    }

    /// Projects the field `name` out of the held value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scollections::maybe::Maybe;
    ///
    /// let row = Maybe::some(vec![10, 20, 30]);
    /// assert_eq!(row.pick(&1), Maybe::Some(20));
    /// assert_eq!(row.pick(&5), Maybe::None);
    /// ```
    pub fn pick<Q>(&self, name: &Q) -> Maybe<T::Output>
    where
        T: Pick<Q>,
        Q: ?Sized,
    {
        match self {
            Self::Some(value) => value.pick(name).into(),
            Self::None => Maybe::None,
        }
    }

    /// Returns `true` if the held value equals `candidate`.
    pub fn contains(&self, candidate: &T) -> bool
    where
        T: PartialEq,
    {
        matches!(self, Self::Some(value) if value == candidate)
    }

    /// Returns `true` if a value is present and satisfies `predicate`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => false,
        }
    }

    /// Returns `true` if no value is present or the value satisfies
    /// `predicate`.
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Some(value) => predicate(value),
            Self::None => true,
        }
    }

    /// Calls `action` with the value, if any.
    pub fn each<F>(&self, action: F)
    where
        F: FnOnce(&T),
    {
        if let Self::Some(value) = self {
            action(value);
        }
    }

    /// Collapses the value: `if_empty()` for `None`, `function(value)` for
    /// `Some`.
    pub fn fold<B, E, F>(self, if_empty: E, function: F) -> B
    where
        E: FnOnce() -> B,
        F: FnOnce(T) -> B,
    {
        match self {
            Self::Some(value) => function(value),
            Self::None => if_empty(),
        }
    }

    /// Returns an iterator over the held value.
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().to_option().into_iter()
    }

    /// Converts into a standard [`Option`].
    pub fn to_option(self) -> Option<T> {
        match self {
            Self::Some(value) => Some(value),
            Self::None => None,
        }
    }

    /// Converts into a sequence of zero or one element.
    pub fn to_seq(self) -> Seq<T>
    where
        T: Clone + 'static,
    {
        match self {
            Self::Some(value) => Seq::from_vec(vec![value]),
            Self::None => Seq::empty(),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::None,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(maybe: Maybe<T>) -> Self {
        maybe.to_option()
    }
}

impl<T> IntoIterator for Maybe<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_option().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Maybe<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => formatter.debug_tuple("Some").field(value).finish(),
            Self::None => formatter.write_str("None"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => write!(formatter, "Some({value})"),
            Self::None => formatter.write_str("None"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Maybe<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Some(value) => serde::Serialize::serialize(value, serializer),
            Self::None => serializer.serialize_none(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Maybe<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}
