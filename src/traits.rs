//! Core traits for the source/sink/filter system.
//!
//! This module defines the fundamental abstractions of the pipeline: a
//! pull-based lazy sequence ([`Source`]), a push-based consumer ([`Sink`]),
//! a test-and-transform stage ([`Filter`]), and the resource-release
//! capability they all share ([`Close`]).

use crate::error::Result;

/// A capability for releasing underlying resources.
///
/// Every pipeline stage implements `Close`. The default implementation does
/// nothing; stages that wrap other stages must release them on close.
///
/// `close` is idempotent: it may be called any number of times, in any
/// state, including after a failure or before iteration ever started, and it
/// never fails.
pub trait Close {
    /// Release any underlying resources. Idempotent; default is a no-op.
    fn close(&mut self) {}
}

/// A lazy, single-pass, forward-only sequence with one-element look-ahead.
///
/// Sources are pull-based: the underlying computation runs at most once per
/// produced element, triggered by the first `has_next`/`next`/`peek` call
/// that needs it. Once a source reports end-of-data it stays exhausted, and
/// once a computation fails the source is permanently poisoned: querying it
/// again yields [`Error::Poisoned`](crate::error::Error::Poisoned).
///
/// # Examples
///
/// ```rust
/// use pullsift::prelude::*;
///
/// fn main() -> Result<()> {
///     let mut source = sources::from_iter([1, 2, 3]);
///
///     assert!(source.has_next()?);
///     assert_eq!(*source.peek()?, 1);
///     assert_eq!(source.next()?, 1);
///     assert_eq!(source.next()?, 2);
///     assert_eq!(source.next()?, 3);
///     assert!(!source.has_next()?);
///     Ok(())
/// }
/// ```
pub trait Source: Close {
    /// The type of items this source produces
    type Item;

    /// Returns true if another item is available.
    ///
    /// May trigger the underlying computation; repeated calls without an
    /// intervening `next` do not re-trigger it.
    fn has_next(&mut self) -> Result<bool>;

    /// Consume and return the next item.
    ///
    /// Fails with [`Error::Exhausted`](crate::error::Error::Exhausted) if
    /// the source has no more items.
    fn next(&mut self) -> Result<Self::Item>;

    /// Return the next item without consuming it.
    ///
    /// Repeated peeks return the same element until `next` is called. Fails
    /// with [`Error::Exhausted`](crate::error::Error::Exhausted) if the
    /// source has no more items.
    fn peek(&mut self) -> Result<&Self::Item>;
}

/// A push-style consumer of items.
///
/// # Examples
///
/// ```rust
/// use pullsift::error::Result;
/// use pullsift::traits::{Close, Sink};
///
/// struct LogSink;
///
/// impl Close for LogSink {}
///
/// impl Sink for LogSink {
///     type Item = String;
///
///     fn put(&mut self, item: Self::Item) -> Result<()> {
///         println!("got: {}", item);
///         Ok(())
///     }
/// }
/// ```
pub trait Sink: Close {
    /// The type of items this sink accepts
    type Item;

    /// Consume a single item.
    fn put(&mut self, item: Self::Item) -> Result<()>;
}

/// A stage that accepts-and-possibly-transforms or rejects an item.
///
/// `accept` returns `Ok(Some(_))` with the (possibly transformed) item on
/// acceptance and `Ok(None)` on rejection. Rejection is distinct from a
/// data-dependent failure, which is reported through `Err`.
///
/// Constructors for predicates and the `all`/`and`/`or`/`not` combinator
/// algebra live in the [`filters`](crate::filters) module.
pub trait Filter: Close {
    /// The type of items this filter tests
    type Item;

    /// Apply the filter: item in, transformed-item-or-rejection out.
    fn accept(&mut self, item: Self::Item) -> Result<Option<Self::Item>>;
}

/// A boxed source, for heterogeneous composition such as
/// [`sources::join`](crate::sources::join).
pub type BoxSource<T> = Box<dyn Source<Item = T>>;

/// A boxed filter, for heterogeneous composition such as
/// [`filters::and`](crate::filters::and).
pub type BoxFilter<T> = Box<dyn Filter<Item = T>>;

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) {
        (**self).close();
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    type Item = S::Item;

    fn has_next(&mut self) -> Result<bool> {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }

    fn peek(&mut self) -> Result<&Self::Item> {
        (**self).peek()
    }
}

impl<K: Sink + ?Sized> Sink for Box<K> {
    type Item = K::Item;

    fn put(&mut self, item: Self::Item) -> Result<()> {
        (**self).put(item)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    type Item = F::Item;

    fn accept(&mut self, item: Self::Item) -> Result<Option<Self::Item>> {
        (**self).accept(item)
    }
}

/// Extension trait for composing sources with filters and sinks.
pub trait SourceExt: Source + Sized {
    /// Wrap this source so only filter-accepted items surface.
    fn filter<F>(self, filter: F) -> crate::lazy::LazySource<crate::sources::Filtered<Self, F>>
    where
        F: Filter<Item = Self::Item>,
    {
        crate::sources::filter(self, filter)
    }

    /// Concatenate this source with another source of the same item type.
    fn chain<S2>(self, other: S2) -> crate::lazy::LazySource<crate::sources::Join<Self::Item>>
    where
        Self: 'static,
        Self::Item: 'static,
        S2: Source<Item = Self::Item> + 'static,
    {
        crate::sources::join(vec![
            Box::new(self) as BoxSource<Self::Item>,
            Box::new(other),
        ])
    }

    /// Exhaust this source, discarding items, and return the count consumed.
    fn drain(&mut self) -> Result<u64> {
        crate::sources::drain(self)
    }

    /// Exhaust this source into a sink and return the count consumed.
    fn drain_into<K>(&mut self, sink: &mut K) -> Result<u64>
    where
        K: Sink<Item = Self::Item>,
    {
        crate::sources::drain_into(self, sink)
    }

    /// Adapt this source into a standard [`Iterator`].
    ///
    /// See [`sources::iter`](crate::sources::iter) for the failure
    /// narrowing this implies.
    fn iter(self) -> crate::sources::Iter<Self> {
        crate::sources::iter(self)
    }
}

// Auto-implement SourceExt for all sources
impl<S: Source> SourceExt for S {}
