//! Fixed-cadence rate limiter for outbound registry requests.

use std::time::Duration;
use tokio::{
	sync::Mutex,
	time::{sleep_until, Instant},
};

/// Serializes outbound requests to one per fixed interval.
///
/// The cadence is shared by all concurrent callers in the process: callers
/// suspend until their slot comes up, they never fail or drop. The first
/// acquisition is immediate.
#[derive(Debug)]
pub struct FixedCadence {
	interval: Duration,
	next_slot: Mutex<Instant>,
}

impl FixedCadence {
	/// Creates a limiter allowing one request per `interval`.
	pub fn new(interval: Duration) -> Self {
		Self {
			interval,
			next_slot: Mutex::new(Instant::now()),
		}
	}

	/// Waits for the next request slot.
	///
	/// Slot assignment is the only critical section; the wait itself happens
	/// outside the lock so callers queue up in slot order without serializing
	/// their sleeps.
	pub async fn acquire(&self) {
		let slot = {
			let mut next_slot = self.next_slot.lock().await;
			let slot = (*next_slot).max(Instant::now());
			*next_slot = slot + self.interval;
			slot
		};
		sleep_until(slot).await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test(start_paused = true)]
	async fn test_sequential_acquisitions_are_spaced() {
		let limiter = FixedCadence::new(Duration::from_millis(100));
		let start = Instant::now();

		limiter.acquire().await;
		limiter.acquire().await;
		limiter.acquire().await;

		// First slot is immediate, the next two wait one interval each.
		assert!(start.elapsed() >= Duration::from_millis(200));
	}

	#[tokio::test(start_paused = true)]
	async fn test_concurrent_callers_share_one_budget() {
		use std::sync::Arc;

		let limiter = Arc::new(FixedCadence::new(Duration::from_millis(50)));
		let start = Instant::now();

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let limiter = limiter.clone();
				tokio::spawn(async move { limiter.acquire().await })
			})
			.collect();
		for handle in handles {
			handle.await.unwrap();
		}

		// Four callers, one immediate slot, three spaced intervals.
		assert!(start.elapsed() >= Duration::from_millis(150));
	}
}
