//! The lazy-computation state machine behind every source.
//!
//! Concrete sources supply a single [`Produce`] step; [`LazySource`] wraps
//! it and drives the `has_next`/`next`/`peek` contract, caching one
//! look-ahead element and tracking end-of-data and failure.

use std::mem;

use crate::error::{Error, Result};
use crate::traits::{Close, Source};

/// The "compute next" extension point.
///
/// This is the sole extension point for sources: every source in this crate
/// is a `Produce` implementation wrapped in [`LazySource`]. `produce`
/// returns `Ok(Some(item))` for a fresh element and `Ok(None)` as the
/// end-of-data marker; it is called at most once per produced element.
///
/// # Examples
///
/// ```rust
/// use pullsift::prelude::*;
///
/// struct Countdown(u32);
///
/// impl Produce for Countdown {
///     type Item = u32;
///
///     fn produce(&mut self) -> Result<Option<u32>> {
///         if self.0 == 0 {
///             Ok(None) // end of data
///         } else {
///             self.0 -= 1;
///             Ok(Some(self.0))
///         }
///     }
/// }
///
/// fn main() -> Result<()> {
///     let mut source = LazySource::new(Countdown(3));
///     assert_eq!(source.next()?, 2);
///     assert_eq!(source.next()?, 1);
///     assert_eq!(source.next()?, 0);
///     assert!(!source.has_next()?);
///     Ok(())
/// }
/// ```
pub trait Produce {
    /// The type of items this step computes
    type Item;

    /// Compute the next item, or `Ok(None)` once the sequence is exhausted.
    fn produce(&mut self) -> Result<Option<Self::Item>>;

    /// Release any underlying resources. Idempotent; default is a no-op.
    fn close(&mut self) {}
}

/// Iteration state of a [`LazySource`].
///
/// `Ready` carries the cached element, so a ready source without a value is
/// unrepresentable.
enum State<T> {
    /// Next element computed and available via peek or next
    Ready(T),
    /// Next element not yet computed
    NotReady,
    /// No more elements
    Done,
    /// Computing the next element failed
    Failed,
}

/// A lazy sequence driven by a [`Produce`] step.
///
/// Caches a single look-ahead element so `has_next` and `peek` can be called
/// any number of times without re-triggering the computation. `Done` and
/// `Failed` are sticky: an exhausted source stays exhausted, and a source
/// whose computation failed refuses further queries with
/// [`Error::Poisoned`].
pub struct LazySource<P: Produce> {
    producer: P,
    state: State<P::Item>,
}

impl<P: Produce> LazySource<P> {
    /// Wrap a computation step into a lazy source.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            state: State::NotReady,
        }
    }

    fn try_compute_next(&mut self) -> Result<bool> {
        // Provisionally poison: if produce() faults, the machine stays
        // Failed and refuses all further queries.
        self.state = State::Failed;
        match self.producer.produce() {
            Ok(Some(item)) => {
                self.state = State::Ready(item);
                Ok(true)
            }
            Ok(None) => {
                self.state = State::Done;
                Ok(false)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %e, "source computation failed; source is now poisoned");
                Err(e)
            }
        }
    }
}

impl<P: Produce> Close for LazySource<P> {
    fn close(&mut self) {
        self.producer.close();
    }
}

impl<P: Produce> Source for LazySource<P> {
    type Item = P::Item;

    fn has_next(&mut self) -> Result<bool> {
        match self.state {
            State::Failed => Err(Error::Poisoned),
            State::Done => Ok(false),
            State::Ready(_) => Ok(true),
            State::NotReady => self.try_compute_next(),
        }
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.has_next()? {
            return Err(Error::Exhausted);
        }
        match mem::replace(&mut self.state, State::NotReady) {
            State::Ready(item) => Ok(item),
            // has_next() returned true, so the state is Ready
            _ => Err(Error::Exhausted),
        }
    }

    fn peek(&mut self) -> Result<&Self::Item> {
        if !self.has_next()? {
            return Err(Error::Exhausted);
        }
        match &self.state {
            State::Ready(item) => Ok(item),
            _ => Err(Error::Exhausted),
        }
    }
}
