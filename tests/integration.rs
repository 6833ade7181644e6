//! Integration tests for the lazy source/sink/filter pipeline.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pullsift::prelude::*;
use pullsift::util::{filter_from_fn, from_fn, sink_from_fn};

#[test]
fn drain_counts_every_inserted_item_in_order() -> Result<()> {
    let mut source = sources::from_iter(["a", "b", "c", "d", "e"]);
    let mut collected = CollectSink::new();

    assert_eq!(sources::drain_into(&mut source, &mut collected)?, 5);
    assert_eq!(collected.items(), ["a", "b", "c", "d", "e"]);
    Ok(())
}

#[test]
fn peek_is_idempotent_and_next_advances_exactly_once() -> Result<()> {
    let mut source = sources::from_iter([10, 20, 30]);

    for _ in 0..4 {
        assert_eq!(*source.peek()?, 10);
    }
    assert_eq!(source.next()?, 10);
    assert_eq!(*source.peek()?, 20);
    assert_eq!(source.next()?, 20);
    assert_eq!(source.next()?, 30);
    Ok(())
}

#[test]
fn exhaustion_is_sticky() -> Result<()> {
    let mut source = sources::from_iter(["a"]);
    assert_eq!(source.next()?, "a");

    for _ in 0..3 {
        assert!(!source.has_next()?);
    }
    assert!(matches!(source.next(), Err(Error::Exhausted)));
    assert!(matches!(source.peek(), Err(Error::Exhausted)));
    Ok(())
}

#[test]
fn join_yields_children_in_order_and_skips_empties() -> Result<()> {
    let mut joined = sources::join(vec![
        Box::new(sources::empty()) as BoxSource<&str>,
        Box::new(sources::from_iter(["a"])),
        Box::new(sources::empty()),
        Box::new(sources::from_iter(["b", "c"])),
        Box::new(sources::empty()),
    ]);

    let mut out = Vec::new();
    sources::drain_to(&mut joined, &mut out)?;
    assert_eq!(out, ["a", "b", "c"]);

    joined.close();
    joined.close();
    Ok(())
}

#[test]
fn filtered_pipeline_end_to_end() -> Result<()> {
    // Keep numbers in [10, 100), then scale them; reject the rest.
    let keep = filters::and(vec![
        Box::new(filters::ge::<i64>(10)) as BoxFilter<i64>,
        Box::new(filters::lt(100)),
        Box::new(filter_from_fn(|n: i64| Ok(Some(n * 2)))),
    ]);

    let source = sources::from_iter([1, 10, 50, 99, 100, 3]);
    let mut filtered = sources::filter(source, keep);

    let mut collected = CollectSink::new();
    assert_eq!(sources::drain_into(&mut filtered, &mut collected)?, 3);
    assert_eq!(collected.items(), [20, 100, 198]);

    filtered.close();
    Ok(())
}

#[test]
fn fan_out_to_multiple_sinks_via_all() -> Result<()> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let count = Rc::new(Cell::new(0u64));
    let (seen_sink, count_sink) = (seen.clone(), count.clone());

    let tee = filters::all(vec![
        Box::new(filters::from_sink(sink_from_fn(move |n: i64| {
            seen_sink.borrow_mut().push(n);
            Ok(())
        }))) as BoxFilter<i64>,
        Box::new(filters::from_sink(sink_from_fn(move |_: i64| {
            count_sink.set(count_sink.get() + 1);
            Ok(())
        }))),
    ]);

    let source = sources::filter(sources::from_iter([1, 2, 3, 4]), filters::gt(2));
    let mut piped = sources::filter(source, tee);
    assert_eq!(sources::drain(&mut piped)?, 2);

    assert_eq!(*seen.borrow(), [3, 4]);
    assert_eq!(count.get(), 2);
    Ok(())
}

#[test]
fn boolean_identities_hold_through_pipelines() -> Result<()> {
    // Empty and() accepts everything; empty or() rejects everything.
    let mut accept_all = sources::filter(sources::from_iter([1, 2, 3]), filters::and(vec![]));
    assert_eq!(sources::drain(&mut accept_all)?, 3);

    let mut reject_all = sources::filter(sources::from_iter([1, 2, 3]), filters::or(vec![]));
    assert_eq!(sources::drain(&mut reject_all)?, 0);
    Ok(())
}

#[test]
fn failed_source_poisons_the_whole_pipeline() {
    let mut produced = 0;
    let failing = from_fn(move || {
        produced += 1;
        if produced < 3 {
            Ok(Some(produced))
        } else {
            Err(Error::custom("malformed record"))
        }
    });

    let mut filtered = sources::filter(failing, filters::ge(0));

    assert_eq!(filtered.next().unwrap(), 1);
    assert_eq!(filtered.next().unwrap(), 2);
    assert!(matches!(filtered.next(), Err(Error::Custom(_))));

    // Further queries hit the poisoned state machine, a distinct
    // programming-error fault.
    assert!(matches!(filtered.has_next(), Err(Error::Poisoned)));

    // Release still works after a failure.
    filtered.close();
    filtered.close();
}

#[test]
fn chained_sources_then_iterator_adapter() -> Result<()> {
    let chained = sources::from_iter([1, 2]).chain(sources::from_iter([3, 4]));
    let doubled: Vec<i64> = chained.iter().map(|n| n * 2).collect();
    assert_eq!(doubled, [2, 4, 6, 8]);
    Ok(())
}
