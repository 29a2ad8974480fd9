//! Bridge between the collections and dynamically shaped JSON values.
//!
//! Typed Rust code cannot hand a flat-mapper a non-iterable or make
//! `Map::map` return something other than a pair: those mistakes are
//! compile errors. Data read as [`serde_json::Value`] has no such
//! guarantee, so the operations here check the shape of every value at run
//! time and report [`CollectionError`] when it is wrong.
//!
//! # Examples
//!
//! ```rust
//! use scollections::collection::{Map, Seq};
//! use scollections::error::CollectionError;
//! use serde_json::json;
//!
//! let rows = Seq::from_json(json!([[1, 2], [3]])).unwrap();
//! assert_eq!(rows.flatten_json().unwrap().len(), 3);
//!
//! let bad = Seq::from_json(json!([[1], 2])).unwrap();
//! assert!(matches!(
//!     bad.flatten_json(),
//!     Err(CollectionError::InvalidMapping { .. })
//! ));
//!
//! assert!(Map::from_json(json!("not an object")).is_err());
//! ```

use serde_json::Value;

use crate::collection::{Entries, Map, Seq};
use crate::error::CollectionError;
use crate::maybe::Maybe;
use crate::pick::Pick;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Seq<Value> {
    /// Builds an eager sequence from a JSON array; `null` yields the empty
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] for any other value.
    pub fn from_json(value: Value) -> Result<Self, CollectionError> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::Array(elements) => Ok(Self::from_vec(elements)),
            other => Err(CollectionError::InvalidArgument {
                expected: "an array or null",
                found: kind(&other).to_string(),
            }),
        }
    }

    /// Concatenates the arrays held by the elements.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidMapping`] if an element is not an
    /// array.
    pub fn flatten_json(&self) -> Result<Self, CollectionError> {
        let mut flattened = Vec::new();
        for element in self {
            let Value::Array(inner) = element else {
                return Err(CollectionError::InvalidMapping {
                    operation: "Seq::flatten_json",
                    expected: "an array",
                });
            };
            flattened.extend(inner);
        }
        Ok(Self::from_vec(flattened))
    }

    /// Flat-maps every element through `function`, which must return an
    /// array.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidMapping`] on the first result that
    /// is not an array.
    pub fn flat_map_json<F>(&self, function: F) -> Result<Self, CollectionError>
    where
        F: FnMut(Value) -> Value,
    {
        self.iter().map(function).collect::<Self>().flatten_json()
    }

    /// Returns the elements as a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.to_vec())
    }
}

impl Map<String, Value> {
    /// Builds an eager map from a JSON object; `null` yields the empty map.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] for any other value.
    pub fn from_json(value: Value) -> Result<Self, CollectionError> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::Object(object) => Ok(Self::from_pairs(object)),
            other => Err(CollectionError::InvalidArgument {
                expected: "an object or null",
                found: kind(&other).to_string(),
            }),
        }
    }

    /// Maps every entry through `function`, which must return a
    /// `[key, value]` array with a string key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidMapping`] on the first result of
    /// any other shape.
    pub fn map_json<F>(&self, mut function: F) -> Result<Self, CollectionError>
    where
        F: FnMut(Value, String) -> Value,
    {
        let mut entries = Entries::default();
        for (key, value) in self {
            let Value::Array(pair) = function(value, key) else {
                return Err(Self::not_a_pair());
            };
            let Ok([Value::String(key), value]) = <[Value; 2]>::try_from(pair) else {
                return Err(Self::not_a_pair());
            };
            entries.insert(key, value);
        }
        Ok(Self::from_entries(entries))
    }

    const fn not_a_pair() -> CollectionError {
        CollectionError::InvalidMapping {
            operation: "Map::map_json",
            expected: "a [key, value] array with a string key",
        }
    }

    /// Returns the entries as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.iter().collect())
    }
}

impl Maybe<Value> {
    /// Wraps a JSON value; `null` becomes `None`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::None,
            other => Self::Some(other),
        }
    }

    /// Flat-maps the value through `function`, which must return an
    /// option-shaped value: `null` or an array of at most one element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] for any other result.
    pub fn flat_map_json<F>(self, function: F) -> Result<Self, CollectionError>
    where
        F: FnOnce(Value) -> Value,
    {
        let Self::Some(value) = self else {
            return Ok(Self::None);
        };
        match function(value) {
            Value::Null => Ok(Self::None),
            Value::Array(mut elements) if elements.len() <= 1 => Ok(elements.pop().into()),
            other => Err(CollectionError::TypeMismatch {
                expected: "null or an array of at most one element",
                found: kind(&other).to_string(),
            }),
        }
    }
}

impl Pick<str> for Value {
    type Output = Self;

    fn pick(&self, name: &str) -> Option<Self> {
        self.get(name).cloned()
    }
}

impl Pick<usize> for Value {
    type Output = Self;

    fn pick(&self, index: &usize) -> Option<Self> {
        self.get(*index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), 0)]
    #[case(json!([1, 2, 3]), 3)]
    fn test_seq_from_json_accepts_arrays_and_null(#[case] value: Value, #[case] length: usize) {
        assert_eq!(Seq::from_json(value).map(|seq| seq.len()), Ok(length));
    }

    #[rstest]
    fn test_seq_from_json_rejects_scalars() {
        assert_eq!(
            Seq::from_json(json!(7)),
            Err(CollectionError::InvalidArgument {
                expected: "an array or null",
                found: "number".to_string(),
            })
        );
    }

    #[rstest]
    fn test_map_json_requires_string_keyed_pairs() {
        let map = Map::from_json(json!({"a": 1})).unwrap();
        let swapped = map
            .map_json(|value, key| json!([value.to_string(), key]))
            .unwrap();
        assert_eq!(swapped.get("1").to_option(), Some(json!("a")));
        assert!(map.map_json(|value, _| json!([value, 0])).is_err());
        assert!(map.map_json(|value, _| value).is_err());
    }

    #[rstest]
    fn test_flat_map_json_on_maybe() {
        let present = Maybe::from_json(json!(3));
        assert_eq!(
            present.clone().flat_map_json(|value| json!([value])),
            Ok(Maybe::Some(json!(3)))
        );
        assert_eq!(present.clone().flat_map_json(|_| json!(null)), Ok(Maybe::None));
        assert!(matches!(
            present.flat_map_json(|value| value),
            Err(CollectionError::TypeMismatch { .. })
        ));
    }

    #[rstest]
    fn test_pick_from_value() {
        let row = json!({"tags": ["x", "y"]});
        assert_eq!(row.pick("tags").and_then(|tags| tags.pick(&1)), Some(json!("y")));
    }
}
