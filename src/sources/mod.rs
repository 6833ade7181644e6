//! Source constructors and combinators.
//!
//! Constructors ([`empty`], [`from_iter`]) adapt external data into lazy
//! sources; combinators ([`join`], [`filter`]) compose sources; the
//! [`drain`] family exhausts a source into a sink, a `Vec`, or nowhere; and
//! [`iter`] adapts a source back into a standard [`Iterator`].
//!
//! Every source here is a [`Produce`] step wrapped in [`LazySource`]; the
//! state machine in [`lazy`](crate::lazy) is the only place that drives
//! `has_next`/`next`/`peek`.

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::error::Result;
use crate::lazy::{LazySource, Produce};
use crate::sinks::DiscardSink;
use crate::traits::{BoxSource, Sink, Source};

/// The computation step behind [`empty`].
pub struct Empty<T> {
    _phantom: PhantomData<T>,
}

/// Create a source with no elements.
pub fn empty<T>() -> LazySource<Empty<T>> {
    LazySource::new(Empty {
        _phantom: PhantomData,
    })
}

impl<T> Produce for Empty<T> {
    type Item = T;

    fn produce(&mut self) -> Result<Option<T>> {
        Ok(None)
    }
}

/// The computation step behind [`from_iter`].
pub struct IterProduce<I> {
    inner: I,
}

/// Adapt anything iterable into a source.
///
/// This covers fixed arrays, collections, and one-shot iterators alike:
///
/// ```rust
/// use pullsift::prelude::*;
///
/// let mut source = sources::from_iter(["a", "b", "c"]);
/// assert_eq!(sources::drain(&mut source).unwrap(), 3);
/// ```
pub fn from_iter<I: IntoIterator>(items: I) -> LazySource<IterProduce<I::IntoIter>> {
    LazySource::new(IterProduce {
        inner: items.into_iter(),
    })
}

impl<I: Iterator> Produce for IterProduce<I> {
    type Item = I::Item;

    fn produce(&mut self) -> Result<Option<I::Item>> {
        Ok(self.inner.next())
    }
}

/// The computation step behind [`join`].
pub struct Join<T> {
    sources: VecDeque<BoxSource<T>>,
}

/// Present an ordered sequence of sources as one.
///
/// Children are consumed front to back; each child is closed as soon as it
/// is exhausted. Closing the join closes the current child and every
/// not-yet-consumed child, even if iteration never started.
pub fn join<T>(sources: Vec<BoxSource<T>>) -> LazySource<Join<T>> {
    LazySource::new(Join {
        sources: sources.into(),
    })
}

impl<T> Produce for Join<T> {
    type Item = T;

    fn produce(&mut self) -> Result<Option<T>> {
        loop {
            match self.sources.front_mut() {
                None => return Ok(None),
                Some(current) => {
                    if current.has_next()? {
                        return current.next().map(Some);
                    }
                }
            }
            if let Some(mut exhausted) = self.sources.pop_front() {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    remaining = self.sources.len(),
                    "child source exhausted; closing it"
                );
                exhausted.close();
            }
        }
    }

    fn close(&mut self) {
        while let Some(mut source) = self.sources.pop_front() {
            source.close();
        }
    }
}

/// The computation step behind [`filter`].
pub struct Filtered<S, F> {
    source: S,
    filter: F,
}

/// Wrap a source so only filter-accepted items surface.
///
/// Rejected items are skipped transparently; the underlying source advances
/// past them. Accepted items carry any transformation the filter applied.
/// Closing the wrapper closes both the source and the filter.
pub fn filter<S, F>(source: S, filter: F) -> LazySource<Filtered<S, F>>
where
    S: Source,
    F: crate::traits::Filter<Item = S::Item>,
{
    LazySource::new(Filtered { source, filter })
}

impl<S, F> Produce for Filtered<S, F>
where
    S: Source,
    F: crate::traits::Filter<Item = S::Item>,
{
    type Item = S::Item;

    fn produce(&mut self) -> Result<Option<S::Item>> {
        while self.source.has_next()? {
            let item = self.source.next()?;
            if let Some(accepted) = self.filter.accept(item)? {
                return Ok(Some(accepted));
            }
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.source.close();
        self.filter.close();
    }
}

/// Exhaust a source, discarding every item, and return the count consumed.
///
/// The source is not closed; release stays with the caller.
pub fn drain<S: Source>(source: &mut S) -> Result<u64> {
    drain_into(source, &mut DiscardSink::new())
}

/// Exhaust a source into a sink and return the count consumed.
///
/// Neither the source nor the sink is closed.
pub fn drain_into<S, K>(source: &mut S, sink: &mut K) -> Result<u64>
where
    S: Source,
    K: Sink<Item = S::Item>,
{
    let mut count = 0u64;
    while source.has_next()? {
        sink.put(source.next()?)?;
        count += 1;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(count, "source drained");
    Ok(count)
}

/// Exhaust a source into a `Vec` and return the count consumed.
pub fn drain_to<S: Source>(source: &mut S, out: &mut Vec<S::Item>) -> Result<u64> {
    let mut count = 0u64;
    while source.has_next()? {
        out.push(source.next()?);
        count += 1;
    }
    Ok(count)
}

/// A [`Source`] adapted into the standard iteration protocol.
///
/// `Iterator::next` has no failure channel, so this adapter deliberately
/// narrows every data-dependent source failure into a panic. Callers that
/// need to handle failures must stay on the [`Source`] contract instead.
/// The std protocol has no element removal, so nothing corresponds to it
/// here.
pub struct Iter<S> {
    source: S,
}

/// Adapt a source into a standard [`Iterator`].
pub fn iter<S: Source>(source: S) -> Iter<S> {
    Iter { source }
}

impl<S: Source> Iterator for Iter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        match self.source.has_next() {
            Ok(true) => match self.source.next() {
                Ok(item) => Some(item),
                Err(e) => panic!("source failed during iteration: {e}"),
            },
            Ok(false) => None,
            Err(e) => panic!("source failed during iteration: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::Error;
    use crate::filters;
    use crate::traits::{Close, SourceExt};
    use crate::util::from_fn;

    #[test]
    fn empty_has_nothing() {
        let mut s = empty::<&str>();
        assert!(!s.has_next().unwrap());
        assert!(matches!(s.next(), Err(Error::Exhausted)));
    }

    #[test]
    fn from_iter_preserves_order() {
        let mut s = from_iter(["a", "b", "c"]);
        let mut out = Vec::new();
        assert_eq!(drain_to(&mut s, &mut out).unwrap(), 3);
        assert_eq!(out, ["a", "b", "c"]);
    }

    #[test]
    fn join_skips_empty_children_in_order() {
        let mut s = join(vec![
            Box::new(empty()) as BoxSource<&str>,
            Box::new(from_iter(["a"])),
            Box::new(empty()),
            Box::new(from_iter(["b", "c"])),
            Box::new(empty()),
        ]);

        assert_eq!(s.next().unwrap(), "a");
        assert_eq!(s.next().unwrap(), "b");
        assert_eq!(s.next().unwrap(), "c");
        assert!(!s.has_next().unwrap());
    }

    /// A source that records how many times it was closed.
    struct CloseCounting<S> {
        inner: S,
        closes: Rc<Cell<u32>>,
    }

    impl<S: Source> Close for CloseCounting<S> {
        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
            self.inner.close();
        }
    }

    impl<S: Source> Source for CloseCounting<S> {
        type Item = S::Item;

        fn has_next(&mut self) -> Result<bool> {
            self.inner.has_next()
        }

        fn next(&mut self) -> Result<S::Item> {
            self.inner.next()
        }

        fn peek(&mut self) -> Result<&S::Item> {
            self.inner.peek()
        }
    }

    fn counted_children(n: usize) -> (Vec<BoxSource<&'static str>>, Vec<Rc<Cell<u32>>>) {
        let counts: Vec<Rc<Cell<u32>>> = (0..n).map(|_| Rc::new(Cell::new(0))).collect();
        let children = counts
            .iter()
            .map(|c| {
                Box::new(CloseCounting {
                    inner: from_iter(["x"]),
                    closes: c.clone(),
                }) as BoxSource<&'static str>
            })
            .collect();
        (children, counts)
    }

    #[test]
    fn join_closes_each_child_exactly_once_after_consumption() {
        let (children, counts) = counted_children(3);
        let mut s = join(children);
        assert_eq!(drain(&mut s).unwrap(), 3);
        s.close();
        for count in &counts {
            assert_eq!(count.get(), 1);
        }
    }

    #[test]
    fn join_close_before_iteration_reaches_every_child() {
        let (children, counts) = counted_children(3);
        let mut s = join(children);
        s.close();
        s.close();
        for count in &counts {
            assert_eq!(count.get(), 1);
        }
    }

    #[test]
    fn join_close_midway_reaches_unconsumed_children() {
        let (children, counts) = counted_children(3);
        let mut s = join(children);
        assert_eq!(s.next().unwrap(), "x");
        assert_eq!(s.next().unwrap(), "x");
        // First child was closed eagerly on exhaustion; the second is still
        // current and the third was never touched.
        assert_eq!(counts[0].get(), 1);
        s.close();
        for count in &counts {
            assert_eq!(count.get(), 1);
        }
    }

    #[test]
    fn filter_surfaces_only_accepted_items() {
        let mut all = filter(from_iter(["a", "b", "c"]), filters::constant(true));
        assert_eq!(drain(&mut all).unwrap(), 3);

        let mut none = filter(from_iter(["a", "b", "c"]), filters::constant(false));
        assert_eq!(drain(&mut none).unwrap(), 0);

        let mut gt_b = filter(from_iter(["a", "b", "c"]), filters::gt("b"));
        let mut out = Vec::new();
        assert_eq!(drain_to(&mut gt_b, &mut out).unwrap(), 1);
        assert_eq!(out, ["c"]);
    }

    #[test]
    fn filter_skips_rejected_items_under_peek() {
        let mut s = filter(from_iter([1, 2, 3, 4]), filters::gt(2));
        assert_eq!(*s.peek().unwrap(), 3);
        assert_eq!(s.next().unwrap(), 3);
        assert_eq!(s.next().unwrap(), 4);
        assert!(!s.has_next().unwrap());
    }

    #[test]
    fn drain_into_sink_preserves_order() {
        let mut s = from_iter(["a", "b", "c"]);
        let mut sink = crate::sinks::CollectSink::new();
        assert_eq!(drain_into(&mut s, &mut sink).unwrap(), 3);
        assert_eq!(sink.items(), ["a", "b", "c"]);
    }

    #[test]
    fn chain_concatenates_two_sources() {
        let mut s = from_iter([1, 2, 3]).chain(from_iter([4, 5, 6]));
        let mut out = Vec::new();
        drain_to(&mut s, &mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn iter_adapter_yields_all_items() {
        assert_eq!(iter(empty::<&str>()).count(), 0);
        let collected: Vec<_> = iter(from_iter(["a", "b", "c"])).collect();
        assert_eq!(collected, ["a", "b", "c"]);
    }

    #[test]
    #[should_panic(expected = "source failed during iteration")]
    fn iter_adapter_panics_on_source_failure() {
        let failing = from_fn(|| -> Result<Option<&'static str>> {
            Err(Error::custom("bad data"))
        });
        iter(failing).next();
    }
}
