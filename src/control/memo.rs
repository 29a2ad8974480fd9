//! Memoized one-shot computations.
//!
//! [`Memo`] defers a computation until its value is first requested and
//! keeps the result for every later request. Deferred maps use it to build
//! their entries at most once, no matter how many times they are read.
//!
//! # Examples
//!
//! ```rust
//! use scollections::control::Memo;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&calls);
//! let memo = Memo::new(move || {
//!     counter.set(counter.get() + 1);
//!     vec![1, 2, 3]
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(memo.force().len(), 3);
//! assert_eq!(memo.force().len(), 3);
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;

type Initializer<T> = Box<dyn FnOnce() -> T>;

enum MemoState<T> {
    Pending(Initializer<T>),
    Ready(T),
    /// The initializer panicked; the value can never be produced.
    Poisoned,
}

/// A lazily computed, memoized value.
///
/// The initializer is boxed so that memo cells built from different
/// closures share one type, which lets a collection hold either a ready or
/// a pending memo behind the same field.
///
/// # Thread Safety
///
/// This type is NOT thread-safe. Collections built on it are `!Send`.
pub struct Memo<T> {
    state: RefCell<MemoState<T>>,
}

impl<T> Memo<T> {
    /// Creates a memo whose value is computed by `initializer` on first use.
    pub fn new<F>(initializer: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Self {
            state: RefCell::new(MemoState::Pending(Box::new(initializer))),
        }
    }

    /// Creates a memo that already holds `value`.
    pub const fn ready(value: T) -> Self {
        Self {
            state: RefCell::new(MemoState::Ready(value)),
        }
    }

    /// Computes the value if needed and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the initializer panicked during an earlier call.
    pub fn force(&self) -> Ref<'_, T> {
        let pending = matches!(&*self.state.borrow(), MemoState::Pending(_));
        if pending {
            self.initialize();
        }

        Ref::map(self.state.borrow(), |state| match state {
            MemoState::Ready(value) => value,
            MemoState::Pending(_) | MemoState::Poisoned => {
                panic!("Memo instance has been poisoned")
            }
        })
    }

    fn initialize(&self) {
        let initializer = {
            let mut state = self.state.borrow_mut();
            match std::mem::replace(&mut *state, MemoState::Poisoned) {
                MemoState::Pending(initializer) => initializer,
                other => {
                    *state = other;
                    return;
                }
            }
        };

        // The borrow is released while the initializer runs so that it may
        // read other memo cells.
        let value = initializer();
        *self.state.borrow_mut() = MemoState::Ready(value);
    }

    /// Returns whether the value has been computed.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.borrow(), MemoState::Ready(_))
    }

    /// Returns whether the initializer panicked.
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), MemoState::Poisoned)
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            MemoState::Ready(value) => formatter.debug_tuple("Memo").field(value).finish(),
            MemoState::Pending(_) => formatter.debug_tuple("Memo").field(&"<pending>").finish(),
            MemoState::Poisoned => formatter.debug_tuple("Memo").field(&"<poisoned>").finish(),
        }
    }
}
