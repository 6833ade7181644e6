//! Error types for the source/sink/filter system.

use std::sync::Arc;

use thiserror::Error;

/// The main error type for the pipeline system.
///
/// Data-dependent failures from a pipeline stage are wrapped in the
/// stage-specific variants; `Exhausted` and `Poisoned` are protocol
/// violations raised by the library itself.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A source failed while computing its next item
    #[error("source error: {0}")]
    Source(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A sink failed to consume an item
    #[error("sink error: {0}")]
    Sink(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A filter failed while testing or transforming an item
    #[error("filter error: {0}")]
    Filter(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// `next` or `peek` was called on an exhausted source
    #[error("source is exhausted")]
    Exhausted,

    /// A source that previously failed was queried again.
    ///
    /// This is a programming error on the caller's side, distinct from the
    /// data failure that poisoned the source in the first place.
    #[error("source previously failed and must not be queried again")]
    Poisoned,

    /// A custom error with a message
    #[error("{0}")]
    Custom(String),
}

// Convenience constructors
impl Error {
    /// Create a source error from any error type
    pub fn source<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Source(Arc::new(error))
    }

    /// Create a sink error from any error type
    pub fn sink<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Sink(Arc::new(error))
    }

    /// Create a filter error from any error type
    pub fn filter<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Filter(Arc::new(error))
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }
}

// Common conversions
impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Custom(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;
