//! Deferred evaluation primitives.
//!
//! This module provides the two building blocks behind lazy collections:
//!
//! - [`CachedSource`]: makes a single-pass producer re-readable by caching
//!   every item it yields
//! - [`Memo`]: a one-shot computation whose result is kept after the first
//!   request
//!
//! # Examples
//!
//! ```rust
//! use scollections::control::{CachedSource, Memo};
//! use std::rc::Rc;
//!
//! let source = Rc::new(CachedSource::new(vec![1, 2, 3]));
//! assert_eq!(CachedSource::cursor(&source).sum::<i32>(), 6);
//! assert_eq!(CachedSource::cursor(&source).count(), 3);
//!
//! let memo = Memo::new(|| "computed once".to_string());
//! assert_eq!(memo.force().as_str(), "computed once");
//! ```

mod cached_source;
mod memo;

pub use cached_source::{CachedSource, Cursor};
pub use memo::Memo;
