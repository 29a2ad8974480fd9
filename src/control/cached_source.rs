//! Re-readable wrapper around single-pass producers.
//!
//! An iterator can be consumed only once. [`CachedSource`] owns such an
//! iterator (or a factory that creates it) and records every item it
//! produces, so that any number of [`Cursor`]s can read the same items
//! without the producer being restarted or asked twice for one position.
//!
//! # Protocol
//!
//! A cursor at position `p` first replays `cache[p]` if it exists. Once it
//! reaches the end of the cache it pulls the next item from the producer,
//! appends it to the cache and yields it. The producer position only moves
//! forward and is shared by every cursor of the source.
//!
//! ```text
//!   cursor A ──┐        cursor B ──┐
//!              ▼                   ▼
//!   cache: [ a0, a1, a2, a3 ] ◄── producer.next() ◄── one-shot iterator
//! ```
//!
//! # Examples
//!
//! ```rust
//! use scollections::control::CachedSource;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let pulls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&pulls);
//! let source = Rc::new(CachedSource::new((1..=3).inspect(move |_| {
//!     counter.set(counter.get() + 1);
//! })));
//!
//! let first: Vec<i32> = CachedSource::cursor(&source).collect();
//! let second: Vec<i32> = CachedSource::cursor(&source).collect();
//!
//! assert_eq!(first, vec![1, 2, 3]);
//! assert_eq!(second, vec![1, 2, 3]);
//! assert_eq!(pulls.get(), 3);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Producer<T> = Box<dyn Iterator<Item = T>>;
type ProducerFactory<T> = Box<dyn FnOnce() -> Producer<T>>;

enum SourceState<T> {
    /// The producer has not been created yet.
    Pending(ProducerFactory<T>),
    /// The producer is live and positioned after the last cached item.
    Pulling(Producer<T>),
    Exhausted,
    /// The factory panicked while creating the producer.
    Poisoned,
}

/// A single-pass producer together with the cache of everything it yielded.
pub struct CachedSource<T> {
    cache: RefCell<Vec<T>>,
    state: RefCell<SourceState<T>>,
}

impl<T> CachedSource<T> {
    /// Wraps an already-started one-shot iterator.
    ///
    /// Nothing is pulled until a cursor asks for an item.
    pub fn new<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            cache: RefCell::new(Vec::new()),
            state: RefCell::new(SourceState::Pulling(Box::new(iterable.into_iter()))),
        }
    }

    /// Wraps a factory that creates the producer on first pull.
    ///
    /// The factory is invoked at most once.
    pub fn deferred<F, I>(factory: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            cache: RefCell::new(Vec::new()),
            state: RefCell::new(SourceState::Pending(Box::new(move || {
                Box::new(factory().into_iter()) as Producer<T>
            }))),
        }
    }

    /// Returns the number of items produced so far.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns whether the producer has no more items.
    pub fn is_exhausted(&self) -> bool {
        matches!(&*self.state.borrow(), SourceState::Exhausted)
    }

    /// Pulls one item from the producer, creating it first if needed.
    ///
    /// Returns `None` once the producer is exhausted. The item is not cached
    /// by this method.
    fn pull(&self) -> Option<T> {
        let factory = {
            let mut state = self.state.borrow_mut();
            if matches!(&*state, SourceState::Pending(_)) {
                match std::mem::replace(&mut *state, SourceState::Poisoned) {
                    SourceState::Pending(factory) => Some(factory),
                    _ => None,
                }
            } else {
                None
            }
        };
        if let Some(factory) = factory {
            log::trace!("starting deferred producer");
            // The factory may read other sources, so no borrow is held here.
            let producer = factory();
            *self.state.borrow_mut() = SourceState::Pulling(producer);
        }

        let mut state = self.state.borrow_mut();
        let next = match &mut *state {
            SourceState::Pulling(producer) => producer.next(),
            SourceState::Exhausted => return None,
            SourceState::Pending(_) | SourceState::Poisoned => {
                panic!("CachedSource producer has been poisoned")
            }
        };
        if next.is_none() {
            *state = SourceState::Exhausted;
            log::trace!(
                "deferred producer exhausted after {} items",
                self.cache.borrow().len()
            );
        }
        next
    }
}

impl<T: Clone> CachedSource<T> {
    /// Returns an iterator over every item of the source, starting from the
    /// first one.
    ///
    /// Cached items are replayed; further items are pulled on demand.
    pub fn cursor(source: &Rc<Self>) -> Cursor<T> {
        Cursor {
            source: Rc::clone(source),
            position: 0,
        }
    }

    /// Returns the item at `index`, pulling only as far as needed.
    pub fn get(&self, index: usize) -> Option<T> {
        loop {
            if let Some(item) = self.cache.borrow().get(index) {
                return Some(item.clone());
            }
            let item = self.pull()?;
            self.cache.borrow_mut().push(item);
        }
    }

    /// Pulls every remaining item into the cache.
    pub fn fill(&self) {
        while let Some(item) = self.pull() {
            self.cache.borrow_mut().push(item);
        }
    }

    /// Pulls every remaining item and returns a copy of all items.
    pub fn to_vec(&self) -> Vec<T> {
        self.fill();
        self.cache.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for CachedSource<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CachedSource")
            .field("cached", &*self.cache.borrow())
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}

/// A read position over a [`CachedSource`].
///
/// Cursors own a reference to their source, so they can outlive the
/// collection they were obtained from.
pub struct Cursor<T> {
    source: Rc<CachedSource<T>>,
    position: usize,
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.source.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cached = self.source.cached_len().saturating_sub(self.position);
        if self.source.is_exhausted() {
            (cached, Some(cached))
        } else {
            (cached, None)
        }
    }
}

impl<T: Clone> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            position: self.position,
        }
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
