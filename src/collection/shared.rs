//! Pieces shared by every collection type: the hasher used for keyed
//! storage, the entry-level reads common to both map kinds and the registry
//! of shared empty instances.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::error::CollectionError;

/// The hasher used by maps and deduplication sets.
///
/// Selected at compile time with the `fxhash` and `ahash` features; `fxhash`
/// wins when both are enabled.
#[cfg(feature = "fxhash")]
pub type EntryHasher = rustc_hash::FxBuildHasher;

/// The hasher used by maps and deduplication sets.
///
/// Selected at compile time with the `fxhash` and `ahash` features; `fxhash`
/// wins when both are enabled.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type EntryHasher = ahash::RandomState;

/// The hasher used by maps and deduplication sets.
///
/// Selected at compile time with the `fxhash` and `ahash` features; `fxhash`
/// wins when both are enabled.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type EntryHasher = std::collections::hash_map::RandomState;

/// Insertion-ordered key/value storage backing `Map` and `MutableMap`.
pub type Entries<K, V> = IndexMap<K, V, EntryHasher>;

/// Insertion-ordered set used to track keys that were already seen.
pub(crate) type SeenSet<K> = IndexSet<K, EntryHasher>;

/// A positional slice of insertion-ordered entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    /// The first `n` entries.
    Leading(usize),
    /// The last `n` entries.
    Trailing(usize),
    /// Everything after the first `n` entries.
    Skipping(usize),
}

impl Window {
    /// Copies the entries that fall inside the window, in order.
    pub(crate) fn select<K, V>(self, entries: &Entries<K, V>) -> Entries<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let length = entries.len();
        let (start, end) = match self {
            Self::Leading(count) => (0, count.min(length)),
            Self::Trailing(count) => (length.saturating_sub(count), length),
            Self::Skipping(count) => (count.min(length), length),
        };
        entries
            .iter()
            .skip(start)
            .take(end - start)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Splits `entries` into groups keyed by `projector`.
///
/// Groups appear in order of their first entry and keep the order of their
/// members.
pub(crate) fn group_entries<K, V, G, F>(
    entries: &Entries<K, V>,
    mut projector: F,
) -> Entries<G, Entries<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
    G: Eq + Hash,
    F: FnMut(&V, &K) -> G,
{
    let mut groups: Entries<G, Entries<K, V>> = Entries::default();
    for (key, value) in entries {
        groups
            .entry(projector(value, key))
            .or_default()
            .insert(key.clone(), value.clone());
    }
    groups
}

/// Returns the entry whose projected value compares as `wanted` against all
/// others; the first entry wins a tie.
pub(crate) fn extreme_entry<K, V, O, F>(
    entries: &Entries<K, V>,
    operation: &'static str,
    mut projector: F,
    wanted: Ordering,
) -> Result<(K, V), CollectionError>
where
    K: Clone,
    V: Clone,
    O: Ord,
    F: FnMut(&V, &K) -> O,
{
    let mut best: Option<(O, usize)> = None;
    for (index, (key, value)) in entries.iter().enumerate() {
        let candidate = projector(value, key);
        // Strict comparison keeps the first of equal candidates.
        if best
            .as_ref()
            .is_none_or(|(best_key, _)| candidate.cmp(best_key) == wanted)
        {
            best = Some((candidate, index));
        }
    }
    best.and_then(|(_, index)| entries.get_index(index))
        .map(|(key, value)| (key.clone(), value.clone()))
        .ok_or(CollectionError::EmptyCollection { operation })
}

thread_local! {
    /// One empty instance per collection type, created on first request.
    static EMPTY_INSTANCES: RefCell<HashMap<TypeId, Box<dyn Any>>> =
        RefCell::new(HashMap::new());
}

/// Returns the shared empty instance of `C`, creating it with `create` the
/// first time it is requested on this thread.
///
/// Collections are reference counted with `Rc`, so every clone handed out
/// here points at the same allocation.
pub(crate) fn shared_empty<C, F>(create: F) -> C
where
    C: Clone + 'static,
    F: FnOnce() -> C,
{
    EMPTY_INSTANCES.with(|instances| {
        let type_id = TypeId::of::<C>();
        if let Some(existing) = instances
            .borrow()
            .get(&type_id)
            .and_then(|instance| instance.downcast_ref::<C>())
        {
            return existing.clone();
        }

        log::trace!("creating shared empty {}", std::any::type_name::<C>());
        let instance = create();
        instances
            .borrow_mut()
            .insert(type_id, Box::new(instance.clone()));
        instance
    })
}
