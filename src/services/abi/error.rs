//! ABI registry error types.
//!
//! Registry failures never abort the pipeline; the resolver collapses them
//! into `AbiEntry::FetchFailed` so classification always produces a category.
//! The error types exist so the failure is logged with full context first.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

/// ABI registry error type
#[derive(Debug, Error)]
pub enum AbiError {
	/// Failure in making the registry request
	#[error("ABI registry request failed: {0}")]
	RequestFailed(Box<ErrorContext>),

	/// The registry response could not be interpreted as an ABI or a known sentinel
	#[error("Failed to parse ABI registry response: {0}")]
	ResponseParseError(Box<ErrorContext>),
}

impl AbiError {
	/// Creates a RequestFailed error
	pub fn request_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RequestFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a ResponseParseError
	pub fn response_parse_error(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ResponseParseError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}
}

impl TraceableError for AbiError {
	fn trace_id(&self) -> String {
		match self {
			Self::RequestFailed(ctx) | Self::ResponseParseError(ctx) => ctx.trace_id.clone(),
		}
	}
}
