//! Block acquisition and trigger modes.
//!
//! `run_once` processes a single block and exits. `watch` polls the source for
//! new block numbers and feeds them through a bounded queue to a single
//! consumer, which waits out the settling delay before fetching each block so
//! the source has attached receipts and logs. The producer awaits queue
//! capacity, so a slow consumer slows polling instead of dropping blocks.

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};

use crate::models::Block;
use crate::services::{
	abi::AbiRegistry,
	blockchain::BlockSourceClient,
	pipeline::{
		driver::{BlockReport, PipelineDriver},
		error::PipelineError,
	},
	recorder::DocumentStore,
};

/// Acquires blocks and hands them to the [`PipelineDriver`].
pub struct BlockWatcher<C, R, S> {
	client: Arc<C>,
	driver: Arc<PipelineDriver<C, R, S>>,
	settling_delay: Duration,
	poll_interval: Duration,
	queue_capacity: usize,
}

impl<C, R, S> BlockWatcher<C, R, S>
where
	C: BlockSourceClient + 'static,
	R: AbiRegistry + 'static,
	S: DocumentStore + 'static,
{
	pub fn new(
		client: Arc<C>,
		driver: Arc<PipelineDriver<C, R, S>>,
		settling_delay: Duration,
		poll_interval: Duration,
		queue_capacity: usize,
	) -> Self {
		Self {
			client,
			driver,
			settling_delay,
			poll_interval,
			queue_capacity: queue_capacity.max(1),
		}
	}

	/// Processes one block and returns its report.
	///
	/// Fetches the latest block number when none is given. No settling delay
	/// is applied; the caller asked for the block as it stands.
	pub async fn run_once(&self, block_number: Option<u64>) -> Result<BlockReport, PipelineError> {
		let number = match block_number {
			Some(number) => number,
			None => self.client.get_latest_block_number().await.map_err(|e| {
				PipelineError::block_fetch_failed(
					"Failed to fetch latest block number",
					Some(e.into()),
					None,
				)
			})?,
		};

		let block = self.fetch_block(number).await?;
		Ok(self.driver.process_block(&block).await)
	}

	/// Polls for new blocks until `shutdown` flips to `true`.
	///
	/// Every block number observed after startup is processed exactly once,
	/// in order, by a single consumer task. Poll failures are logged and the
	/// next tick retries; they never stop the watcher.
	pub async fn watch(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), PipelineError> {
		let (queue_tx, queue_rx) = mpsc::channel::<u64>(self.queue_capacity);
		let consumer = tokio::spawn(consume_blocks(
			self.client.clone(),
			self.driver.clone(),
			self.settling_delay,
			queue_rx,
		));

		let mut last_seen = self.client.get_latest_block_number().await.map_err(|e| {
			PipelineError::block_fetch_failed(
				"Failed to fetch latest block number at startup",
				Some(e.into()),
				None,
			)
		})?;
		tracing::info!(last_seen, "watching for new blocks");

		let mut ticker = tokio::time::interval(self.poll_interval);
		ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

		loop {
			tokio::select! {
				changed = shutdown.changed() => {
					// A dropped sender counts as a shutdown request.
					if changed.is_err() || *shutdown.borrow() {
						break;
					}
				}
				_ = ticker.tick() => {
					let latest = match self.client.get_latest_block_number().await {
						Ok(latest) => latest,
						Err(e) => {
							tracing::warn!(error = %e, "latest block poll failed");
							continue;
						}
					};

					for number in (last_seen + 1)..=latest {
						if queue_tx.send(number).await.is_err() {
							return Err(PipelineError::queue_closed(
								"Pending-block queue closed while watching",
								None,
								Some(HashMap::from([(
									"block_number".to_string(),
									number.to_string(),
								)])),
							));
						}
						last_seen = number;
					}
				}
			}
		}

		// Dropping the sender drains the queue and ends the consumer.
		drop(queue_tx);
		tracing::info!("shutdown requested, draining pending blocks");
		let _ = consumer.await;
		Ok(())
	}

	async fn fetch_block(&self, number: u64) -> Result<Block, PipelineError> {
		self.client.get_block(number).await.map_err(|e| {
			PipelineError::block_fetch_failed(
				format!("Failed to fetch block {}", number),
				Some(e.into()),
				Some(HashMap::from([(
					"block_number".to_string(),
					number.to_string(),
				)])),
			)
		})
	}
}

async fn consume_blocks<C, R, S>(
	client: Arc<C>,
	driver: Arc<PipelineDriver<C, R, S>>,
	settling_delay: Duration,
	mut queue: mpsc::Receiver<u64>,
) where
	C: BlockSourceClient,
	R: AbiRegistry,
	S: DocumentStore,
{
	while let Some(number) = queue.recv().await {
		// Let the source finish attaching receipts and logs.
		tokio::time::sleep(settling_delay).await;

		match client.get_block(number).await {
			Ok(block) => {
				driver.process_block(&block).await;
			}
			Err(e) => {
				tracing::error!(block_number = number, error = %e, "block fetch failed, skipping");
			}
		}
	}
}
