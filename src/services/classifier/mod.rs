//! Classification of decode attempts into terminal categories.
//!
//! Pure decision tables over `(DecodeOutcome, had_logs)`; the same inputs
//! always yield the same category and tag set. Failure states never escape
//! here: ABI unavailability and parse failures are categories, not errors.

use crate::{models::Category, services::decoder::DecodeOutcome};

/// Classifies one log's decode attempt.
///
/// `had_logs` is checked before ABI availability: a logless transaction is
/// always `empty`, regardless of the ABI state.
///
/// # Returns
/// * `(Category, Vec<String>)` - The terminal category and its full tag set
pub fn classify_log(
	outcome: &DecodeOutcome,
	had_logs: bool,
	chain: &str,
) -> (Category, Vec<String>) {
	let category = log_category(outcome, had_logs);
	(category, tags_for(category, chain))
}

/// Classifies a transaction-level call-input decode attempt.
///
/// There is no `empty` case for call inputs; anything short of a successful
/// decode routes to `not-decoded-transactions`.
pub fn classify_call(outcome: &DecodeOutcome, chain: &str) -> (Category, Vec<String>) {
	let category = call_category(outcome);
	(category, tags_for(category, chain))
}

/// Full tag set for a category: the chain tag first, then the category tags.
pub fn tags_for(category: Category, chain: &str) -> Vec<String> {
	let mut tags = Vec::with_capacity(1 + category.base_tags().len());
	tags.push(chain.to_string());
	tags.extend(category.base_tags().iter().map(|tag| tag.to_string()));
	tags
}

fn log_category(outcome: &DecodeOutcome, had_logs: bool) -> Category {
	if !had_logs {
		return Category::Empty;
	}

	match outcome {
		DecodeOutcome::NoAbi => Category::NotDecoded,
		DecodeOutcome::Decoded { .. } => Category::Decoded,
		DecodeOutcome::DecodeFailed => Category::NotParsed,
	}
}

fn call_category(outcome: &DecodeOutcome) -> Category {
	match outcome {
		DecodeOutcome::Decoded { .. } => Category::DecodedTransactions,
		DecodeOutcome::DecodeFailed | DecodeOutcome::NoAbi => Category::NotDecodedTransactions,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::Map;

	fn decoded() -> DecodeOutcome {
		DecodeOutcome::Decoded {
			name: "Transfer".to_string(),
			args: Map::new(),
		}
	}

	#[test]
	fn test_log_decision_table() {
		assert_eq!(
			classify_log(&DecodeOutcome::NoAbi, true, "ethereum"),
			(
				Category::NotDecoded,
				vec![
					"ethereum".to_string(),
					"not-decoded".to_string(),
					"abi-not-available".to_string()
				]
			)
		);
		assert_eq!(
			classify_log(&decoded(), true, "ethereum"),
			(
				Category::Decoded,
				vec!["ethereum".to_string(), "decoded".to_string()]
			)
		);
		assert_eq!(
			classify_log(&DecodeOutcome::DecodeFailed, true, "ethereum"),
			(
				Category::NotParsed,
				vec![
					"ethereum".to_string(),
					"not-decoded".to_string(),
					"not-parsed".to_string()
				]
			)
		);
	}

	#[test]
	fn test_zero_logs_wins_over_abi_state() {
		// The empty category applies regardless of how resolution went.
		for outcome in [DecodeOutcome::NoAbi, DecodeOutcome::DecodeFailed, decoded()] {
			let (category, tags) = classify_log(&outcome, false, "ethereum");
			assert_eq!(category, Category::Empty);
			assert_eq!(tags, vec!["ethereum".to_string(), "empty-log".to_string()]);
		}
	}

	#[test]
	fn test_call_decision_table() {
		assert_eq!(
			classify_call(&decoded(), "ethereum").0,
			Category::DecodedTransactions
		);
		assert_eq!(
			classify_call(&DecodeOutcome::DecodeFailed, "ethereum").0,
			Category::NotDecodedTransactions
		);
		assert_eq!(
			classify_call(&DecodeOutcome::NoAbi, "ethereum").0,
			Category::NotDecodedTransactions
		);
	}

	#[test]
	fn test_classification_is_idempotent() {
		let first = classify_log(&DecodeOutcome::DecodeFailed, true, "ethereum");
		let second = classify_log(&DecodeOutcome::DecodeFailed, true, "ethereum");
		assert_eq!(first, second);
	}

	#[test]
	fn test_chain_tag_always_leads() {
		for category in Category::ALL {
			let tags = tags_for(category, "polygon");
			assert_eq!(tags[0], "polygon");
		}
	}
}
