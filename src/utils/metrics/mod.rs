//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the pipeline counters incremented by the services.

use lazy_static::lazy_static;
use prometheus::{CounterVec, IntCounter, Opts, Registry};

lazy_static! {
	/// Global Prometheus registry.
	///
	/// Holds all metrics defined in this module.
	pub static ref REGISTRY: Registry = Registry::new();

	/// Counter for records ingested into the document store, by partition.
	pub static ref RECORDS_INGESTED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("records_ingested_total", "Classified records written, by partition"),
			&["partition"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for failed store writes, by partition.
	pub static ref INGEST_FAILURES: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("ingest_failures_total", "Failed store writes, by partition"),
			&["partition"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for ABI resolutions, by outcome (verified, unverified, fetch_failed).
	pub static ref ABI_RESOLUTIONS: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("abi_resolutions_total", "ABI registry resolutions, by outcome"),
			&["outcome"],
		)
		.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for blocks fully processed by the pipeline.
	pub static ref BLOCKS_PROCESSED: IntCounter = {
		let counter = IntCounter::new("blocks_processed_total", "Blocks processed").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for transactions whose processing was aborted by a source error.
	pub static ref TRANSACTION_FAILURES: IntCounter = {
		let counter =
			IntCounter::new("transaction_failures_total", "Transactions aborted by source errors")
				.unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}
