//! # Lazily-evaluated, closeable pull/push pipelines
//!
//! This crate provides a small, strictly synchronous pipeline library built
//! around three capabilities:
//!
//! - **Source**: a lazy, single-pass, forward-only sequence with one-element
//!   look-ahead (`has_next`/`next`/`peek`)
//! - **Sink**: a push-style consumer of items
//! - **Filter**: accepts-and-possibly-transforms or rejects an item, with a
//!   combinator algebra (`all`/`and`/`or`/`not`)
//!
//! Every stage is closeable: releasing a composed stage cascades to the
//! stages it owns, and release is always idempotent.
//!
//! ## Example
//!
//! ```rust
//! use pullsift::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let source = sources::from_iter(["a", "b", "c"]);
//!     let mut filtered = sources::filter(source, filters::gt("b"));
//!
//!     let mut collected = CollectSink::new();
//!     let count = sources::drain_into(&mut filtered, &mut collected)?;
//!     assert_eq!(count, 1);
//!     assert_eq!(collected.items(), ["c"]);
//!
//!     filtered.close();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod filters;
pub mod lazy;
pub mod sinks;
pub mod sources;
pub mod traits;
pub mod util;

// Re-export commonly used items
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::lazy::{LazySource, Produce};
    pub use crate::sinks::{CollectSink, CountSink, DiscardSink, PrintSink};
    pub use crate::traits::{BoxFilter, BoxSource, Close, Filter, Sink, Source, SourceExt};
    pub use crate::{filters, sources};
}

// Re-export main error type
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
