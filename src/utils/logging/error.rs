//! Enhanced error context for service errors.
//!
//! Provides the `ErrorContext` payload carried by every service error variant
//! and the `TraceableError` trait used to correlate log lines with errors.

use chrono::Utc;
use std::{collections::HashMap, fmt};
use uuid::Uuid;

/// Structured context attached to a service error.
///
/// Captures the human-readable message, the underlying source error (if any),
/// optional key-value metadata, and a trace id that also appears in the log
/// line emitted when the context is created with `new_with_log`.
#[derive(Debug)]
pub struct ErrorContext {
	/// The error message
	pub message: String,
	/// The underlying source of the error, if any
	pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
	/// Additional structured context for the error
	pub metadata: Option<HashMap<String, String>>,
	/// RFC 3339 timestamp of when the error was created
	pub timestamp: String,
	/// Unique id correlating this error with emitted log lines
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context without logging it.
	pub fn new(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id: Uuid::new_v4().to_string(),
		}
	}

	/// Creates a new error context and emits it as a structured error log.
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		tracing::error!(
			trace_id = %context.trace_id,
			metadata = ?context.metadata,
			source = context.source.as_ref().map(|s| s.to_string()),
			"{}",
			context.message
		);
		context
	}

	/// Formats the message together with its metadata, sorted by key for
	/// deterministic output.
	pub fn format_with_metadata(&self) -> String {
		match &self.metadata {
			Some(metadata) if !metadata.is_empty() => {
				let mut pairs: Vec<_> = metadata.iter().collect();
				pairs.sort_by(|a, b| a.0.cmp(b.0));
				let formatted = pairs
					.iter()
					.map(|(k, v)| format!("{}={}", k, v))
					.collect::<Vec<_>>()
					.join(", ");
				format!("{} [{}]", self.message, formatted)
			}
			_ => self.message.clone(),
		}
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_with_metadata())
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
	}
}

/// Trait for errors that carry a trace id.
///
/// Service error enums implement this by delegating to the trace id of their
/// inner `ErrorContext`.
pub trait TraceableError {
	/// Returns the trace id of the error.
	fn trace_id(&self) -> String;
}
