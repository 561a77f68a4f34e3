//! Persistence error types.
//!
//! Store failures carry enough context (partition, address, payload) to allow
//! manual replay. They are logged and surfaced to the driver, which isolates
//! them per record; there is no automatic retry.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

/// Document store error type
#[derive(Debug, Error)]
pub enum PersistenceError {
	/// Failure writing a record to a partition
	#[error("Store write failed: {0}")]
	WriteFailed(Box<ErrorContext>),

	/// Failure refreshing a partition after a write
	#[error("Store refresh failed: {0}")]
	RefreshFailed(Box<ErrorContext>),
}

impl PersistenceError {
	/// Creates a WriteFailed error
	pub fn write_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::WriteFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a RefreshFailed error
	pub fn refresh_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RefreshFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}
}

impl TraceableError for PersistenceError {
	fn trace_id(&self) -> String {
		match self {
			Self::WriteFailed(ctx) | Self::RefreshFailed(ctx) => ctx.trace_id.clone(),
		}
	}
}
