//! Structural decoding of logs and call inputs against resolved ABIs.
//!
//! Decoding is pure and synchronous: it never mutates its inputs, never
//! performs I/O, and never fails with an error. Every attempt terminates in a
//! [`DecodeOutcome`] the classifier can route.

use ethers_core::abi::{Function, RawLog, Token};
use ethers_core::types::Bytes;
use serde_json::{Map, Value};

use crate::models::{AbiEntry, Log};

/// Result of one decode attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
	/// The payload structurally matched a signature in the interface
	Decoded {
		/// Declared name of the matched event or function
		name: String,
		/// Decoded arguments, keyed by parameter name
		args: Map<String, Value>,
	},
	/// An interface was available but the payload matched no signature
	DecodeFailed,
	/// No usable interface was available; no decode was attempted
	NoAbi,
}

impl DecodeOutcome {
	/// Decoded name, if any.
	pub fn name(&self) -> Option<&str> {
		match self {
			DecodeOutcome::Decoded { name, .. } => Some(name),
			_ => None,
		}
	}
}

/// Attempts to decode a raw log against the resolved ABI entry.
///
/// Tries every event signature in the interface and returns the first
/// structural match. `Unverified` and `FetchFailed` entries short-circuit to
/// [`DecodeOutcome::NoAbi`].
pub fn decode_log(log: &Log, entry: &AbiEntry) -> DecodeOutcome {
	let abi = match entry {
		AbiEntry::Abi(abi) => abi,
		AbiEntry::Unverified | AbiEntry::FetchFailed => return DecodeOutcome::NoAbi,
	};

	let raw = RawLog {
		topics: log.topics.clone(),
		data: log.data.to_vec(),
	};

	for event in abi.events() {
		if let Ok(parsed) = event.parse_log(raw.clone()) {
			let mut args = Map::new();
			for param in parsed.params {
				args.insert(param.name, token_to_value(&param.value));
			}
			return DecodeOutcome::Decoded {
				name: event.name.clone(),
				args,
			};
		}
	}

	DecodeOutcome::DecodeFailed
}

/// Attempts to decode a transaction's call input against the resolved ABI entry.
///
/// Matches on the 4-byte selector, then decodes the argument tail. Inputs
/// shorter than a selector (including empty plain transfers) decode as
/// [`DecodeOutcome::DecodeFailed`].
pub fn decode_call(input: &Bytes, entry: &AbiEntry) -> DecodeOutcome {
	let abi = match entry {
		AbiEntry::Abi(abi) => abi,
		AbiEntry::Unverified | AbiEntry::FetchFailed => return DecodeOutcome::NoAbi,
	};

	let data = input.as_ref();
	if data.len() < 4 {
		return DecodeOutcome::DecodeFailed;
	}

	for function in abi.functions() {
		if function.short_signature() == data[..4] {
			return match function.decode_input(&data[4..]) {
				Ok(tokens) => DecodeOutcome::Decoded {
					name: function.name.clone(),
					args: call_args(function, &tokens),
				},
				// Selector matched but the argument tail is malformed.
				Err(_) => DecodeOutcome::DecodeFailed,
			};
		}
	}

	DecodeOutcome::DecodeFailed
}

fn call_args(function: &Function, tokens: &[Token]) -> Map<String, Value> {
	let mut args = Map::new();
	for (index, (param, token)) in function.inputs.iter().zip(tokens).enumerate() {
		let name = if param.name.is_empty() {
			format!("arg{}", index)
		} else {
			param.name.clone()
		};
		args.insert(name, token_to_value(token));
	}
	args
}

/// Renders an ABI token as JSON.
///
/// Numeric tokens become decimal strings to avoid precision loss; byte
/// tokens become 0x-prefixed hex.
fn token_to_value(token: &Token) -> Value {
	match token {
		Token::Address(address) => Value::String(format!("{:?}", address)),
		Token::FixedBytes(bytes) | Token::Bytes(bytes) => {
			Value::String(format!("0x{}", hex::encode(bytes)))
		}
		Token::Int(value) | Token::Uint(value) => Value::String(value.to_string()),
		Token::Bool(value) => Value::Bool(*value),
		Token::String(value) => Value::String(value.clone()),
		Token::FixedArray(tokens) | Token::Array(tokens) | Token::Tuple(tokens) => {
			Value::Array(tokens.iter().map(token_to_value).collect())
		}
	}
}
