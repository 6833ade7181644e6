//! Utility functions and helper types.
//!
//! Closure adapters for building one-off stages without a named type.

use std::marker::PhantomData;

use crate::error::Result;
use crate::lazy::{LazySource, Produce};
use crate::traits::{Close, Filter, Sink};

/// Create a source from a function.
///
/// The function is the source's "compute next" step: `Ok(Some(item))` for a
/// fresh element, `Ok(None)` for end-of-data.
///
/// ```rust
/// use pullsift::prelude::*;
/// use pullsift::util::from_fn;
///
/// let mut n = 0;
/// let mut source = from_fn(move || {
///     n += 1;
///     if n <= 3 {
///         Ok(Some(n))
///     } else {
///         Ok(None)
///     }
/// });
/// assert_eq!(sources::drain(&mut source).unwrap(), 3);
/// ```
pub fn from_fn<F, T>(f: F) -> LazySource<FnProduce<F, T>>
where
    F: FnMut() -> Result<Option<T>>,
{
    LazySource::new(FnProduce {
        f,
        _phantom: PhantomData,
    })
}

/// A computation step created from a function
pub struct FnProduce<F, T>
where
    F: FnMut() -> Result<Option<T>>,
{
    f: F,
    _phantom: PhantomData<fn() -> T>,
}

impl<F, T> Produce for FnProduce<F, T>
where
    F: FnMut() -> Result<Option<T>>,
{
    type Item = T;

    fn produce(&mut self) -> Result<Option<T>> {
        (self.f)()
    }
}

/// Create a sink from a function.
pub fn sink_from_fn<F, T>(f: F) -> FnSink<F, T>
where
    F: FnMut(T) -> Result<()>,
{
    FnSink {
        f,
        _phantom: PhantomData,
    }
}

/// A sink created from a function
pub struct FnSink<F, T>
where
    F: FnMut(T) -> Result<()>,
{
    f: F,
    _phantom: PhantomData<fn(T)>,
}

impl<F, T> Close for FnSink<F, T> where F: FnMut(T) -> Result<()> {}

impl<F, T> Sink for FnSink<F, T>
where
    F: FnMut(T) -> Result<()>,
{
    type Item = T;

    fn put(&mut self, item: T) -> Result<()> {
        (self.f)(item)
    }
}

/// Create a filter from a function.
///
/// The function returns `Ok(Some(_))` with the (possibly transformed) item
/// on acceptance and `Ok(None)` on rejection.
pub fn filter_from_fn<F, T>(f: F) -> FnFilter<F, T>
where
    F: FnMut(T) -> Result<Option<T>>,
{
    FnFilter {
        f,
        _phantom: PhantomData,
    }
}

/// A filter created from a function
pub struct FnFilter<F, T>
where
    F: FnMut(T) -> Result<Option<T>>,
{
    f: F,
    _phantom: PhantomData<fn(T) -> T>,
}

impl<F, T> Close for FnFilter<F, T> where F: FnMut(T) -> Result<Option<T>> {}

impl<F, T> Filter for FnFilter<F, T>
where
    F: FnMut(T) -> Result<Option<T>>,
{
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        (self.f)(item)
    }
}
