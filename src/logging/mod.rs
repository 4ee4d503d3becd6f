//! Structured logging bootstrap.

mod format;

pub use format::StructuredLogger;
