//! Named field projection.
//!
//! [`Pick`] is the capability of extracting a value by name (a map key or
//! a positional index) from a container-like element. Collections use it
//! for their `*_field` variants (`sort_by_field`, `group_by_field`,
//! `to_map_by_field`) and [`Maybe::pick`](crate::maybe::Maybe::pick) uses it
//! for ad hoc extraction.
//!
//! Record types opt in by implementing `Pick` themselves:
//!
//! ```rust
//! use scollections::pick::{Pick, field};
//!
//! struct Car {
//!     model: String,
//!     maker: String,
//! }
//!
//! impl Pick<str> for Car {
//!     type Output = String;
//!
//!     fn pick(&self, name: &str) -> Option<String> {
//!         match name {
//!             "model" => Some(self.model.clone()),
//!             "maker" => Some(self.maker.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let civic = Car { model: "Civic".into(), maker: "Honda".into() };
//! let maker = field::<Car, str>("maker");
//! assert_eq!(maker(&civic), Some("Honda".to_string()));
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

/// Extraction of a value by name.
pub trait Pick<Q: ?Sized> {
    /// The type of the extracted value.
    type Output;

    /// Returns the value stored under `name`, or `None` if there is none.
    fn pick(&self, name: &Q) -> Option<Self::Output>;
}

/// Builds a projector that picks `name` out of every element it receives.
///
/// The name is copied into the projector, so the projector does not borrow
/// from the caller and can be stored in lazy pipelines.
///
/// # Examples
///
/// ```rust
/// use scollections::pick::field;
/// use std::collections::BTreeMap;
///
/// let row = BTreeMap::from([("id", 7)]);
/// let id = field::<BTreeMap<&str, i32>, str>("id");
/// assert_eq!(id(&row), Some(7));
/// ```
pub fn field<T, Q>(name: &Q) -> impl Fn(&T) -> Option<T::Output> + use<T, Q>
where
    T: Pick<Q> + ?Sized,
    Q: ToOwned + ?Sized,
{
    let owned = name.to_owned();
    move |element: &T| element.pick(owned.borrow())
}

impl<K, V, S, Q> Pick<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    V: Clone,
    S: BuildHasher,
{
    type Output = V;

    fn pick(&self, name: &Q) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<K, V, Q> Pick<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    V: Clone,
{
    type Output = V;

    fn pick(&self, name: &Q) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<K, V, S, Q> Pick<Q> for IndexMap<K, V, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    V: Clone,
    S: BuildHasher,
{
    type Output = V;

    fn pick(&self, name: &Q) -> Option<V> {
        self.get(name).cloned()
    }
}

impl<V: Clone> Pick<usize> for [V] {
    type Output = V;

    fn pick(&self, index: &usize) -> Option<V> {
        self.get(*index).cloned()
    }
}

impl<V: Clone> Pick<usize> for Vec<V> {
    type Output = V;

    fn pick(&self, index: &usize) -> Option<V> {
        self.as_slice().pick(index)
    }
}

impl<V: Clone, const N: usize> Pick<usize> for [V; N] {
    type Output = V;

    fn pick(&self, index: &usize) -> Option<V> {
        self.as_slice().pick(index)
    }
}

impl<T: Pick<Q> + ?Sized, Q: ?Sized> Pick<Q> for &T {
    type Output = T::Output;

    fn pick(&self, name: &Q) -> Option<T::Output> {
        (**self).pick(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_pick_from_hash_map_by_borrowed_key() {
        let row = HashMap::from([("name".to_string(), "Carol".to_string())]);
        assert_eq!(row.pick("name"), Some("Carol".to_string()));
        assert_eq!(row.pick("age"), None);
    }

    #[rstest]
    fn test_pick_from_vec_by_index() {
        let row = vec!["a", "b"];
        assert_eq!(row.pick(&1), Some("b"));
        assert_eq!(row.pick(&2), None);
    }

    #[rstest]
    fn test_pick_from_array() {
        let pair = [3, 4];
        assert_eq!(pair.pick(&0), Some(3));
    }

    #[rstest]
    fn test_field_projector_owns_its_name() {
        let projector = {
            let name = String::from("id");
            field::<BTreeMap<String, i32>, str>(&name)
        };
        let row = BTreeMap::from([("id".to_string(), 9)]);
        assert_eq!(projector(&row), Some(9));
    }

    #[rstest]
    fn test_pick_through_reference() {
        let row = vec![1, 2, 3];
        let borrowed = &row;
        assert_eq!(borrowed.pick(&2), Some(3));
    }
}
