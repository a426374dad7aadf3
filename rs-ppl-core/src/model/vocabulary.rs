use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use log::debug;

use super::ngram::TokenId;
use crate::config::{BOS, EOS, OOV};
use crate::corpus::Corpus;

/// Id of the begin-of-utterance sentinel in every vocabulary.
pub const BOS_ID: TokenId = 0;

/// Id of the end-of-utterance sentinel in every vocabulary.
pub const EOS_ID: TokenId = 1;

/// Id of the out-of-vocabulary symbol in every vocabulary.
pub const OOV_ID: TokenId = 2;

const RESERVED: [&str; 3] = [BOS, EOS, OOV];

/// Splits a raw token stream into kept and rare tokens.
///
/// Frequencies are counted once over the raw stream. A token is kept when
/// its frequency is strictly greater than `threshold`; a token seen exactly
/// `threshold` times is rare.
pub fn partition_tokens<'a, I>(tokens: I, threshold: usize) -> (BTreeSet<String>, BTreeSet<String>)
where
	I: IntoIterator<Item = &'a str>,
{
	let mut frequencies: HashMap<&str, usize> = HashMap::new();
	for token in tokens {
		*frequencies.entry(token).or_insert(0) += 1;
	}

	let mut kept = BTreeSet::new();
	let mut rare = BTreeSet::new();
	for (token, frequency) in frequencies {
		if frequency > threshold {
			kept.insert(token.to_owned());
		} else {
			rare.insert(token.to_owned());
		}
	}
	(kept, rare)
}

/// Closed vocabulary of a trained model.
///
/// Interns the sentinels, the OOV symbol and every kept token of the
/// training corpus. Any other surface form folds into the OOV symbol on
/// lookup.
///
/// # Invariants
/// - Ids `0`, `1` and `2` are always `<s>`, `</s>` and `<UNK>`
/// - Kept tokens follow in lexicographic order, so ids only depend on the
///   corpus contents and the threshold
/// - Sentinels are never folded into OOV
#[derive(Clone, Debug)]
pub struct Vocabulary {
	symbols: Vec<String>,
	index: HashMap<String, TokenId>,
	rare: BTreeSet<String>,
	threshold: usize,
}

impl Vocabulary {
	/// Runs the OOV normalizer over the raw tokens of `corpus`.
	pub fn build(corpus: &Corpus, threshold: usize) -> Self {
		Self::from_tokens(corpus.tokens(), threshold)
	}

	pub fn from_tokens<'a, I>(tokens: I, threshold: usize) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let (kept, rare) = partition_tokens(tokens, threshold);

		let mut symbols: Vec<String> = RESERVED.iter().map(|s| (*s).to_owned()).collect();
		symbols.extend(kept.into_iter().filter(|token| !RESERVED.contains(&token.as_str())));

		let index = symbols
			.iter()
			.enumerate()
			.map(|(id, symbol)| (symbol.clone(), id as TokenId))
			.collect();

		debug!("vocabulary: {} symbols, {} rare tokens (threshold {})", symbols.len(), rare.len(), threshold);

		Self { symbols, index, rare, threshold }
	}

	/// Number of symbols, sentinels and OOV included. This is the size of
	/// every table dimension.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	pub fn threshold(&self) -> usize {
		self.threshold
	}

	/// Returns the id of `token`, or `None` if it is not in the vocabulary.
	pub fn lookup(&self, token: &str) -> Option<TokenId> {
		self.index.get(token).copied()
	}

	/// Returns the id of `token`, folding anything outside the vocabulary
	/// into the OOV symbol.
	pub fn id(&self, token: &str) -> TokenId {
		self.lookup(token).unwrap_or(OOV_ID)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.index.contains_key(token)
	}

	/// Symbol of `id`.
	///
	/// # Panics
	/// Panics if `id` was not produced by this vocabulary.
	pub fn symbol(&self, id: TokenId) -> &str {
		&self.symbols[id as usize]
	}

	/// Every id of the vocabulary, i.e. the index domain of one table axis.
	pub fn ids(&self) -> Range<TokenId> {
		0..self.symbols.len() as TokenId
	}

	/// Tokens kept from the training corpus, reserved symbols excluded.
	pub fn kept(&self) -> impl Iterator<Item = &str> + '_ {
		self.symbols[RESERVED.len()..].iter().map(String::as_str)
	}

	/// Tokens of the training corpus that were folded into OOV.
	pub fn rare(&self) -> &BTreeSet<String> {
		&self.rare
	}

	pub fn is_rare(&self, token: &str) -> bool {
		self.rare.contains(token)
	}
}
