//! Sink implementations.
//!
//! Concrete push-style consumers: discard, collect into a `Vec`, count, or
//! print. All of them are plain single-threaded values; read the results
//! back directly once draining is done.

use std::fmt::Display;
use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{Close, Sink};

/// A sink that drops every item.
///
/// The default destination for [`sources::drain`](crate::sources::drain).
pub struct DiscardSink<T> {
    _phantom: PhantomData<T>,
}

impl<T> DiscardSink<T> {
    /// Create a new discard sink
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Close for DiscardSink<T> {}

impl<T> Sink for DiscardSink<T> {
    type Item = T;

    fn put(&mut self, _item: T) -> Result<()> {
        Ok(())
    }
}

impl<T> Default for DiscardSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sink that collects items into a vector.
pub struct CollectSink<T> {
    items: Vec<T>,
}

impl<T> CollectSink<T> {
    /// Create a new collect sink
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Get the collected items
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take ownership of the collected items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Close for CollectSink<T> {}

impl<T> Sink for CollectSink<T> {
    type Item = T;

    fn put(&mut self, item: T) -> Result<()> {
        self.items.push(item);
        Ok(())
    }
}

impl<T> Default for CollectSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sink that counts items.
pub struct CountSink<T> {
    count: u64,
    _phantom: PhantomData<T>,
}

impl<T> CountSink<T> {
    /// Create a new count sink
    pub fn new() -> Self {
        Self {
            count: 0,
            _phantom: PhantomData,
        }
    }

    /// Get the current count
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<T> Close for CountSink<T> {}

impl<T> Sink for CountSink<T> {
    type Item = T;

    fn put(&mut self, _item: T) -> Result<()> {
        self.count += 1;
        Ok(())
    }
}

impl<T> Default for CountSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sink that prints items to stdout.
pub struct PrintSink<T> {
    /// The prefix to print before each item
    prefix: Option<String>,
    _phantom: PhantomData<T>,
}

impl<T> PrintSink<T> {
    /// Create a new print sink
    pub fn new() -> Self {
        Self {
            prefix: None,
            _phantom: PhantomData,
        }
    }

    /// Create a new print sink with a prefix
    pub fn with_prefix(prefix: String) -> Self {
        Self {
            prefix: Some(prefix),
            _phantom: PhantomData,
        }
    }
}

impl<T> Close for PrintSink<T> {}

impl<T: Display> Sink for PrintSink<T> {
    type Item = T;

    fn put(&mut self, item: T) -> Result<()> {
        match &self.prefix {
            Some(prefix) => println!("{}: {}", prefix, item),
            None => println!("{}", item),
        }
        Ok(())
    }
}

impl<T> Default for PrintSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_sink_keeps_insertion_order() {
        let mut sink = CollectSink::new();
        sink.put("a").unwrap();
        sink.put("b").unwrap();
        assert_eq!(sink.items(), ["a", "b"]);
        assert_eq!(sink.into_items(), vec!["a", "b"]);
    }

    #[test]
    fn count_sink_counts() {
        let mut sink = CountSink::new();
        for i in 0..10 {
            sink.put(i).unwrap();
        }
        assert_eq!(sink.count(), 10);
    }

    #[test]
    fn discard_sink_accepts_everything() {
        let mut sink = DiscardSink::new();
        for i in 0..10 {
            sink.put(i).unwrap();
        }
        sink.close();
    }
}
