use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, configuration};

/// Index of a symbol inside a [`super::vocabulary::Vocabulary`].
pub type TokenId = u32;

/// Highest supported model order.
pub const MAX_ORDER: usize = 3;

/// Order of an n-gram model.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Order {
	Unigram,
	Bigram,
	Trigram,
}

impl Order {
	pub const ALL: [Order; 3] = [Order::Unigram, Order::Bigram, Order::Trigram];

	/// Number of tokens in one n-gram of this order.
	pub fn value(self) -> usize {
		match self {
			Order::Unigram => 1,
			Order::Bigram => 2,
			Order::Trigram => 3,
		}
	}

	/// The next lower order, `None` for unigrams.
	pub fn lower(self) -> Option<Order> {
		match self {
			Order::Unigram => None,
			Order::Bigram => Some(Order::Unigram),
			Order::Trigram => Some(Order::Bigram),
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Order::Unigram => "unigram",
			Order::Bigram => "bigram",
			Order::Trigram => "trigram",
		}
	}
}

impl fmt::Display for Order {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.name())
	}
}

impl FromStr for Order {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"unigram" => Ok(Order::Unigram),
			"bigram" => Ok(Order::Bigram),
			"trigram" => Ok(Order::Trigram),
			other => Err(configuration(format!(
				"unknown model order '{}', expected unigram, bigram or trigram",
				other
			))),
		}
	}
}

/// A context tuple followed by one token, stored as a flat composite key.
///
/// `ids[..len - 1]` is the context (empty for unigrams) and `ids[len - 1]`
/// is the token. Unused slots are always zero so that equality and ordering
/// only depend on the meaningful ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NGram {
	len: u8,
	ids: [TokenId; MAX_ORDER],
}

impl NGram {
	/// Builds a key from a window of ids.
	///
	/// # Panics
	/// Panics if `window` is empty or longer than [`MAX_ORDER`]; callers only
	/// build windows from an [`Order`].
	pub fn new(window: &[TokenId]) -> Self {
		assert!(
			(1..=MAX_ORDER).contains(&window.len()),
			"n-gram length must be between 1 and {}",
			MAX_ORDER
		);
		let mut ids = [0; MAX_ORDER];
		ids[..window.len()].copy_from_slice(window);
		Self { len: window.len() as u8, ids }
	}

	/// Builds a key from a context and the token that follows it.
	pub fn with_context(context: &[TokenId], token: TokenId) -> Self {
		let mut window = [0; MAX_ORDER];
		window[..context.len()].copy_from_slice(context);
		window[context.len()] = token;
		Self::new(&window[..=context.len()])
	}

	pub fn len(&self) -> usize {
		self.len as usize
	}

	pub fn ids(&self) -> &[TokenId] {
		&self.ids[..self.len()]
	}

	pub fn context(&self) -> &[TokenId] {
		&self.ids[..self.len() - 1]
	}

	pub fn token(&self) -> TokenId {
		self.ids[self.len() - 1]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn order_parses_case_insensitively() {
		assert_eq!("Trigram".parse::<Order>().unwrap(), Order::Trigram);
		assert_eq!("unigram".parse::<Order>().unwrap(), Order::Unigram);
		assert!(matches!("fourgram".parse::<Order>(), Err(Error::Configuration(_))));
	}

	#[test]
	fn lower_order_chain() {
		assert_eq!(Order::Trigram.lower(), Some(Order::Bigram));
		assert_eq!(Order::Bigram.lower(), Some(Order::Unigram));
		assert_eq!(Order::Unigram.lower(), None);
	}

	#[test]
	fn key_splits_into_context_and_token() {
		let key = NGram::new(&[4, 5, 6]);
		assert_eq!(key.context(), &[4, 5]);
		assert_eq!(key.token(), 6);
		assert_eq!(NGram::with_context(&[4, 5], 6), key);

		let unigram = NGram::new(&[9]);
		assert!(unigram.context().is_empty());
		assert_eq!(unigram.token(), 9);
	}

	#[test]
	fn keys_of_different_lengths_differ() {
		assert_ne!(NGram::new(&[0, 1]), NGram::new(&[0, 1, 0]));
	}
}
