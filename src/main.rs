//! Service entry point.
//!
//! Loads configuration from the environment, wires the pipeline together, and
//! dispatches on the selected run mode: a single-block run or a polling watch
//! loop with graceful ctrl-c shutdown.

use clap::Parser;
use std::sync::Arc;
use tokio::sync::watch;

use evm_log_extractor::{
	models::AppConfig,
	services::{
		abi::{EtherscanClient, FixedCadence},
		blockchain::EvmClient,
		pipeline::{BlockWatcher, PipelineDriver},
		recorder::{ElasticStore, Recorder},
	},
};

#[derive(Debug, Parser)]
#[command(name = "evm-log-extractor", about = "EVM block log extraction pipeline")]
struct Cli {
	/// Process a single block and exit; watches for new blocks otherwise
	#[arg(long)]
	once: bool,

	/// Block number for a single run; latest when omitted
	#[arg(long, requires = "once")]
	block: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let cli = Cli::parse();
	let config = AppConfig::from_env()?;

	let client = Arc::new(EvmClient::new(
		config.block_api_url.clone(),
		config.block_api_key.clone(),
		config.rpc_url.clone(),
	));
	let registry = Arc::new(EtherscanClient::new(
		config.registry_url.clone(),
		config.registry_api_key.clone(),
	));
	let limiter = Arc::new(FixedCadence::new(config.abi_request_interval));
	let recorder = Arc::new(Recorder::new(
		Arc::new(ElasticStore::new(
			config.store_url.clone(),
			config.store_username.clone(),
			config.store_password.clone(),
		)),
		config.chain.clone(),
		config.timestamp_source,
	));

	let driver = Arc::new(PipelineDriver::new(
		client.clone(),
		registry,
		limiter,
		recorder,
		config.max_concurrent_transactions,
		config.max_concurrent_logs,
	));
	let watcher = BlockWatcher::new(
		client,
		driver,
		config.settling_delay,
		config.poll_interval,
		config.queue_capacity,
	);

	if cli.once {
		let report = watcher.run_once(cli.block).await?;
		tracing::info!(
			block_number = report.block_number,
			records = report.records_written,
			record_failures = report.record_failures,
			transaction_failures = report.transaction_failures,
			"single run complete"
		);
		return Ok(());
	}

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			tracing::info!("ctrl-c received, shutting down");
			let _ = shutdown_tx.send(true);
		}
	});

	watcher.watch(shutdown_rx).await?;
	Ok(())
}
