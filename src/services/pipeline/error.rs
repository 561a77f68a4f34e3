//! Pipeline orchestration error types.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while driving blocks through the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
	/// Failure fetching a block or the latest block number from the source
	#[error("Block fetch failed: {0}")]
	BlockFetchFailed(Box<ErrorContext>),

	/// The pending-block queue closed while the watcher was still running
	#[error("Block queue closed: {0}")]
	QueueClosed(Box<ErrorContext>),
}

impl PipelineError {
	/// Creates a BlockFetchFailed error
	pub fn block_fetch_failed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::BlockFetchFailed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Creates a QueueClosed error
	pub fn queue_closed(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::QueueClosed(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}
}

impl TraceableError for PipelineError {
	fn trace_id(&self) -> String {
		match self {
			Self::BlockFetchFailed(ctx) | Self::QueueClosed(ctx) => ctx.trace_id.clone(),
		}
	}
}
