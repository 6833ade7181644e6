//! Filter constructors and the combinator algebra.
//!
//! Leaf filters test a single item: [`constant`], [`isa`], [`eq`]/[`ne`],
//! and the ordering filters [`lt`]/[`le`]/[`gt`]/[`ge`]. [`from_sink`]
//! adapts a [`Sink`] into an always-accepting filter that forwards each
//! item as a side effect. The combinators [`all`], [`and`], [`or`] and
//! [`not`] compose boxed filters with defined short-circuit and close
//! behavior.
//!
//! Closing a composite filter closes every child, whether or not the child
//! ever ran.

use std::any::Any;
use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{BoxFilter, Close, Filter, Sink};

/// A filter that ignores its input and accepts iff a fixed value is true.
pub struct BoolFilter<T> {
    value: bool,
    _phantom: PhantomData<T>,
}

/// Create a filter that accepts everything (`true`) or nothing (`false`).
pub fn constant<T>(value: bool) -> BoolFilter<T> {
    BoolFilter {
        value,
        _phantom: PhantomData,
    }
}

impl<T> Close for BoolFilter<T> {}

impl<T> Filter for BoolFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        if self.value {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }
}

/// A filter over type-erased items that accepts iff the erased value is a
/// `U`.
pub struct IsaFilter<U> {
    _phantom: PhantomData<fn() -> U>,
}

/// Create a runtime type-test filter.
///
/// Runtime types only exist for erased items, so this filter works on
/// `Box<dyn Any>` sequences:
///
/// ```rust
/// use std::any::Any;
/// use pullsift::prelude::*;
///
/// let mut f = filters::isa::<u32>();
/// assert!(f.accept(Box::new(1u32)).unwrap().is_some());
/// assert!(f.accept(Box::new("a")).unwrap().is_none());
/// ```
pub fn isa<U: Any>() -> IsaFilter<U> {
    IsaFilter {
        _phantom: PhantomData,
    }
}

impl<U> Close for IsaFilter<U> {}

impl<U: Any> Filter for IsaFilter<U> {
    type Item = Box<dyn Any>;

    fn accept(&mut self, item: Box<dyn Any>) -> Result<Option<Box<dyn Any>>> {
        if item.is::<U>() {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }
}

/// A filter that compares items against a fixed value for (in)equality.
pub struct EqFilter<T> {
    expected: T,
    want: bool,
}

/// Create a filter that accepts iff the item equals `expected`.
pub fn eq<T: PartialEq>(expected: T) -> EqFilter<T> {
    EqFilter {
        expected,
        want: true,
    }
}

/// Create a filter that accepts iff the item does not equal `expected`.
pub fn ne<T: PartialEq>(expected: T) -> EqFilter<T> {
    EqFilter {
        expected,
        want: false,
    }
}

impl<T> Close for EqFilter<T> {}

impl<T: PartialEq> Filter for EqFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        if (item == self.expected) == self.want {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }
}

/// A filter that accepts based on the item's 3-way comparison against a
/// fixed bound.
pub struct OrdFilter<T> {
    bound: T,
    accepts: fn(Ordering) -> bool,
}

/// Create a filter that accepts iff the item is less than `bound`.
pub fn lt<T: Ord>(bound: T) -> OrdFilter<T> {
    OrdFilter {
        bound,
        accepts: Ordering::is_lt,
    }
}

/// Create a filter that accepts iff the item is less than or equal to `bound`.
pub fn le<T: Ord>(bound: T) -> OrdFilter<T> {
    OrdFilter {
        bound,
        accepts: Ordering::is_le,
    }
}

/// Create a filter that accepts iff the item is greater than `bound`.
pub fn gt<T: Ord>(bound: T) -> OrdFilter<T> {
    OrdFilter {
        bound,
        accepts: Ordering::is_gt,
    }
}

/// Create a filter that accepts iff the item is greater than or equal to
/// `bound`.
pub fn ge<T: Ord>(bound: T) -> OrdFilter<T> {
    OrdFilter {
        bound,
        accepts: Ordering::is_ge,
    }
}

impl<T> Close for OrdFilter<T> {}

impl<T: Ord> Filter for OrdFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        if (self.accepts)(item.cmp(&self.bound)) {
            Ok(Some(item))
        } else {
            Ok(None)
        }
    }
}

/// An always-accepting filter that forwards every item to a sink.
pub struct SinkFilter<K> {
    sink: K,
}

/// Adapt a sink into a filter.
///
/// Every item is put into the sink as a side effect, then returned
/// unchanged. Combined with [`all`] this gives fan-out to multiple sinks.
/// Closing the filter closes the sink.
pub fn from_sink<K: Sink>(sink: K) -> SinkFilter<K> {
    SinkFilter { sink }
}

impl<K: Sink> Close for SinkFilter<K> {
    fn close(&mut self) {
        self.sink.close();
    }
}

impl<K: Sink> Filter for SinkFilter<K>
where
    K::Item: Clone,
{
    type Item = K::Item;

    fn accept(&mut self, item: K::Item) -> Result<Option<K::Item>> {
        self.sink.put(item.clone())?;
        Ok(Some(item))
    }
}

/// Applies every child filter to the original item; always accepts.
pub struct AllFilter<T> {
    filters: Vec<BoxFilter<T>>,
}

/// Create a filter that applies every child to the original item, ignores
/// each child's verdict, and returns the original item unchanged.
///
/// Used for side effects, typically fanning out to sinks via [`from_sink`].
pub fn all<T>(filters: Vec<BoxFilter<T>>) -> AllFilter<T> {
    AllFilter { filters }
}

impl<T> Close for AllFilter<T> {
    fn close(&mut self) {
        for filter in &mut self.filters {
            filter.close();
        }
    }
}

impl<T: Clone> Filter for AllFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        for filter in &mut self.filters {
            filter.accept(item.clone())?;
        }
        Ok(Some(item))
    }
}

/// Threads the item through each child filter; rejects on the first
/// rejection.
pub struct AndFilter<T> {
    filters: Vec<BoxFilter<T>>,
}

/// Create the conjunction of the given filters.
///
/// Each child receives the previous child's (possibly transformed) output;
/// the first rejection short-circuits. An empty filter set is the identity
/// and accepts everything unchanged.
pub fn and<T>(filters: Vec<BoxFilter<T>>) -> AndFilter<T> {
    AndFilter { filters }
}

impl<T> Close for AndFilter<T> {
    fn close(&mut self) {
        for filter in &mut self.filters {
            filter.close();
        }
    }
}

impl<T> Filter for AndFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        let mut current = item;
        for filter in &mut self.filters {
            match filter.accept(current)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

/// Applies each child filter to the original item; accepts on the first
/// acceptance.
pub struct OrFilter<T> {
    filters: Vec<BoxFilter<T>>,
}

/// Create the disjunction of the given filters.
///
/// Each child receives the original item; the first acceptance wins and its
/// (possibly transformed) output is returned. An empty filter set rejects
/// everything.
pub fn or<T>(filters: Vec<BoxFilter<T>>) -> OrFilter<T> {
    OrFilter { filters }
}

impl<T> Close for OrFilter<T> {
    fn close(&mut self) {
        for filter in &mut self.filters {
            filter.close();
        }
    }
}

impl<T: Clone> Filter for OrFilter<T> {
    type Item = T;

    fn accept(&mut self, item: T) -> Result<Option<T>> {
        for filter in &mut self.filters {
            if let Some(accepted) = filter.accept(item.clone())? {
                return Ok(Some(accepted));
            }
        }
        Ok(None)
    }
}

/// Inverts the wrapped filter's verdict.
pub struct NotFilter<F> {
    inner: F,
}

/// Create the negation of a filter.
///
/// Accepts (returning the original item) iff the wrapped filter rejects.
/// Any transformation the wrapped filter performs is discarded; `not` only
/// ever returns the original item or rejection.
pub fn not<F: Filter>(inner: F) -> NotFilter<F> {
    NotFilter { inner }
}

impl<F: Filter> Close for NotFilter<F> {
    fn close(&mut self) {
        self.inner.close();
    }
}

impl<F: Filter> Filter for NotFilter<F>
where
    F::Item: Clone,
{
    type Item = F::Item;

    fn accept(&mut self, item: F::Item) -> Result<Option<F::Item>> {
        match self.inner.accept(item.clone())? {
            Some(_) => Ok(None),
            None => Ok(Some(item)),
        }
    }
}
