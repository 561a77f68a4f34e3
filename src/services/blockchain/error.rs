//! Block source error types.
//!
//! Errors raised while talking to the chain data source during transaction
//! processing. A source error aborts the affected transaction's processing
//! only; siblings continue. Block acquisition failures surface through the
//! pipeline's own error type instead.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

/// Chain data source error type
#[derive(Debug, Error)]
pub enum SourceError {
	/// Failure looking up code at an address
	#[error("Contract code lookup failed: {0}")]
	CodeLookupError(Box<ErrorContext>),
}

impl SourceError {
	/// Creates a CodeLookupError
	pub fn code_lookup_error(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::CodeLookupError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}
}

impl TraceableError for SourceError {
	fn trace_id(&self) -> String {
		match self {
			Self::CodeLookupError(ctx) => ctx.trace_id.clone(),
		}
	}
}
