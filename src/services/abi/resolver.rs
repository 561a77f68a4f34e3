//! Per-run ABI resolution with memoization and single-flight fetches.

use ethers_core::types::Address;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OnceCell};

use crate::{
	models::AbiEntry,
	services::abi::{
		limiter::FixedCadence,
		registry::{AbiRegistry, RegistryAbi},
	},
	utils::metrics::ABI_RESOLUTIONS,
};

/// Resolves and caches ABIs for the lifetime of one block run.
///
/// Each distinct address is fetched at most once per run: the first caller
/// performs the registry request (through the shared rate limiter) and
/// concurrent callers for the same address await that result. A failed
/// resolution is final for the address for this run; there are no retries.
pub struct AbiResolver<R> {
	registry: Arc<R>,
	limiter: Arc<FixedCadence>,
	cache: Mutex<HashMap<Address, Arc<OnceCell<AbiEntry>>>>,
}

impl<R: AbiRegistry> AbiResolver<R> {
	/// Creates a resolver with an empty cache.
	///
	/// The limiter is shared across runs; the cache is not.
	pub fn new(registry: Arc<R>, limiter: Arc<FixedCadence>) -> Self {
		Self {
			registry,
			limiter,
			cache: Mutex::new(HashMap::new()),
		}
	}

	/// Resolves the ABI entry for `address`, fetching it on first use.
	///
	/// Never fails: registry errors collapse into [`AbiEntry::FetchFailed`]
	/// so classification downstream always produces a category.
	pub async fn resolve(&self, address: Address) -> AbiEntry {
		let cell = {
			let mut cache = self.cache.lock().await;
			cache
				.entry(address)
				.or_insert_with(|| Arc::new(OnceCell::new()))
				.clone()
		};

		cell.get_or_init(|| self.fetch(address)).await.clone()
	}

	async fn fetch(&self, address: Address) -> AbiEntry {
		self.limiter.acquire().await;

		let entry = match self.registry.fetch_abi(&address).await {
			Ok(RegistryAbi::Verified(abi)) => AbiEntry::Abi(abi),
			Ok(RegistryAbi::Unverified) => {
				tracing::warn!(address = ?address, "contract source not verified");
				AbiEntry::Unverified
			}
			Err(e) => {
				// Routed like Unverified downstream, but logged distinctly.
				tracing::warn!(address = ?address, error = %e, "ABI fetch failed");
				AbiEntry::FetchFailed
			}
		};

		ABI_RESOLUTIONS
			.with_label_values(&[entry.outcome_label()])
			.inc();
		entry
	}
}
