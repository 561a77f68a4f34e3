//! Resolved ABI state for a contract address.

use ethers_core::abi::Abi;

/// Outcome of resolving a contract's ABI from the registry.
///
/// Produced once per address per pipeline run by the ABI resolver; the
/// decoder and classifier branch on this closed type rather than on the
/// registry's sentinel wording.
#[derive(Debug, Clone, Default)]
pub enum AbiEntry {
	/// A usable decoding interface
	Abi(Abi),
	/// The registry knows the address but its source is not verified
	Unverified,
	/// The registry request failed or returned an unusable payload.
	/// Routed like `Unverified` downstream, but logged distinctly.
	#[default]
	FetchFailed,
}

impl AbiEntry {
	/// Returns true when this entry carries a usable decoding interface.
	pub fn is_usable(&self) -> bool {
		matches!(self, AbiEntry::Abi(_))
	}

	/// Label used for logs and metrics.
	pub fn outcome_label(&self) -> &'static str {
		match self {
			AbiEntry::Abi(_) => "verified",
			AbiEntry::Unverified => "unverified",
			AbiEntry::FetchFailed => "fetch_failed",
		}
	}
}
