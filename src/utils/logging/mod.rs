//! Logging utilities.
//!
//! - `error`: enhanced error context carried by service error types

pub mod error;

pub use error::{ErrorContext, TraceableError};
