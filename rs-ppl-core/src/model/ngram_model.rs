use std::collections::HashMap;
use std::path::Path;

use log::info;

use super::frequency_table::FrequencyTable;
use super::ngram::{MAX_ORDER, NGram, Order, TokenId};
use super::padding::pad_sequences;
use super::perplexity::{Estimate, Evaluation, LogProbAccumulator};
use super::vocabulary::{BOS_ID, Vocabulary};
use crate::config::ModelConfig;
use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Corpus a perplexity is computed on.
#[derive(Clone, Copy, Debug)]
pub enum EvaluationSet<'a> {
	/// The corpus the model was trained on; its table is reused as is.
	Training,
	/// An independent corpus, folded against the training vocabulary.
	HeldOut(&'a Corpus),
}

/// A trained unigram, bigram or trigram language model.
///
/// # Responsibilities
/// - Build the closed vocabulary and fold rare tokens into OOV
/// - Count every padded n-gram window into a frequency table
/// - Estimate `P(token | context)`, with or without additive smoothing
/// - Compute perplexity on the training corpus or on a held-out corpus
///
/// # Invariants
/// - `table` has the model order; `context_table` exists only for trigrams
///   and holds the bigram counts of the same padded sequences
/// - `unigram_counts` counts the padded, OOV-folded stream
/// - Nothing is mutated after training
#[derive(Clone, Debug)]
pub struct NGramModel {
	order: Order,
	config: ModelConfig,
	vocabulary: Vocabulary,
	table: FrequencyTable,
	context_table: Option<FrequencyTable>,
	unigram_counts: HashMap<TokenId, u64>,
}

impl NGramModel {
	/// Trains a model of `order` on `corpus`.
	///
	/// 1. The OOV normalizer builds the vocabulary from the raw tokens
	/// 2. Lines are padded for the order and folded against the vocabulary
	/// 3. Every adjacent window is counted (trigrams also count bigrams)
	/// 4. Every padded token is counted into the unigram map
	pub fn train(order: Order, corpus: &Corpus, config: ModelConfig) -> Self {
		let vocabulary = Vocabulary::build(corpus, config.oov_threshold);
		let sequences = pad_sequences(corpus, order, &vocabulary);
		let domain_size = vocabulary.len();

		let table = FrequencyTable::from_sequences(order, domain_size, config.smoothing, &sequences);
		let context_table = match order {
			Order::Trigram => Some(FrequencyTable::from_sequences(
				Order::Bigram,
				domain_size,
				config.smoothing,
				&sequences,
			)),
			Order::Unigram | Order::Bigram => None,
		};

		let mut unigram_counts = HashMap::new();
		for id in sequences.iter().flatten() {
			*unigram_counts.entry(*id).or_insert(0) += 1;
		}

		info!(
			"trained {} model: {} symbols, {} transitions, smoothing {}",
			order,
			domain_size,
			table.observed_total(),
			if config.smoothing { "on" } else { "off" }
		);

		Self { order, config, vocabulary, table, context_table, unigram_counts }
	}

	/// Loads `path` and trains a model of `order` on it.
	pub fn from_file<P: AsRef<Path>>(order: Order, path: P, config: ModelConfig) -> Result<Self> {
		let corpus = Corpus::from_file(path)?;
		Ok(Self::train(order, &corpus, config))
	}

	pub fn unigram(corpus: &Corpus, config: ModelConfig) -> Self {
		Self::train(Order::Unigram, corpus, config)
	}

	pub fn bigram(corpus: &Corpus, config: ModelConfig) -> Self {
		Self::train(Order::Bigram, corpus, config)
	}

	pub fn trigram(corpus: &Corpus, config: ModelConfig) -> Self {
		Self::train(Order::Trigram, corpus, config)
	}

	pub fn order(&self) -> Order {
		self.order
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// The table of the model order.
	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Conditional probability `P(token | context)`.
	///
	/// Tokens outside the vocabulary are looked up as OOV. The context is
	/// cut to its last `n - 1` tokens, and a shorter context is left-padded
	/// with begin sentinels, as at the start of an utterance.
	pub fn conditional_probability(&self, token: &str, context: &[&str]) -> f64 {
		self.estimate(token, context).probability()
	}

	/// Counts behind [`NGramModel::conditional_probability`].
	pub fn estimate(&self, token: &str, context: &[&str]) -> Estimate {
		self.estimate_key(self.key(token, context))
	}

	/// Table count of `token` after `context`, pseudo-count included.
	pub fn count(&self, token: &str, context: &[&str]) -> u64 {
		self.table.count(self.key(token, context))
	}

	/// Observed count of `context` as the lower-order n-gram that normalizes
	/// this model: the padded unigram count for bigrams, the bigram count
	/// for trigrams, the number of tokens for unigrams.
	pub fn context_count(&self, context: &[&str]) -> u64 {
		let (ids, width) = self.fold_context(context);
		self.observed_context_count(&ids[..width])
	}

	/// Count of `token` in the padded, OOV-folded training stream.
	pub fn unigram_count(&self, token: &str) -> u64 {
		let id = self.vocabulary.id(token);
		self.unigram_counts.get(&id).copied().unwrap_or(0)
	}

	/// Perplexity on `set`, with the aggregation details.
	///
	/// For a held-out corpus a parallel table is built: same order, same
	/// smoothing, tokens folded against the training vocabulary. Each of its
	/// cells is weighted by its own count and scored with this model.
	///
	/// # Errors
	/// Returns [`Error::EmptyCorpus`] when the evaluated corpus yields no
	/// token transition.
	pub fn evaluate(&self, set: EvaluationSet<'_>) -> Result<Evaluation> {
		match set {
			EvaluationSet::Training => self.aggregate(&self.table, "training corpus"),
			EvaluationSet::HeldOut(corpus) => self.aggregate(&self.held_out_table(corpus), "held-out corpus"),
		}
	}

	/// Counts `corpus` the way the training corpus was counted, against the
	/// training vocabulary: rare or unseen tokens land in the OOV cells even
	/// when they are frequent in `corpus`.
	pub fn held_out_table(&self, corpus: &Corpus) -> FrequencyTable {
		let sequences = pad_sequences(corpus, self.order, &self.vocabulary);
		FrequencyTable::from_sequences(self.order, self.vocabulary.len(), self.config.smoothing, &sequences)
	}

	pub fn perplexity(&self, set: EvaluationSet<'_>) -> Result<f64> {
		Ok(self.evaluate(set)?.perplexity)
	}

	/// Loads a held-out corpus from `path` and evaluates it.
	pub fn evaluate_file<P: AsRef<Path>>(&self, path: P) -> Result<Evaluation> {
		let corpus = Corpus::from_file(path)?;
		self.evaluate(EvaluationSet::HeldOut(&corpus))
	}

	fn aggregate(&self, table: &FrequencyTable, what: &'static str) -> Result<Evaluation> {
		if table.observed_total() == 0 {
			return Err(Error::EmptyCorpus { what });
		}

		let mut accumulator = LogProbAccumulator::new();
		for (key, weight) in table.nonzero_cells() {
			accumulator.add(self.estimate_key(key), weight);
		}
		let evaluation = accumulator.finish(table.total(), what)?;

		info!("{} {} perplexity: {}", self.order, what, evaluation.perplexity);
		Ok(evaluation)
	}

	fn estimate_key(&self, key: NGram) -> Estimate {
		let denominator = match self.order {
			Order::Unigram => self.table.total(),
			Order::Bigram | Order::Trigram => self.observed_context_count(key.context()) + self.smoothing_mass(),
		};
		Estimate { count: self.table.count(key), denominator }
	}

	fn observed_context_count(&self, context: &[TokenId]) -> u64 {
		match (&self.context_table, context) {
			(_, []) => self.table.observed_total(),
			(Some(context_table), [_, _]) => context_table.observed(NGram::new(context)),
			(_, [given]) => self.unigram_counts.get(given).copied().unwrap_or(0),
			_ => 0,
		}
	}

	/// Pseudo-counts added to every context row under smoothing.
	fn smoothing_mass(&self) -> u64 {
		self.config.base_count() * self.vocabulary.len() as u64
	}

	/// Folds `context` into the `n - 1` ids preceding a token.
	fn fold_context(&self, context: &[&str]) -> ([TokenId; MAX_ORDER], usize) {
		let width = self.order.value() - 1;
		let mut ids = [BOS_ID; MAX_ORDER];
		let used = context.len().min(width);
		let skip = width - used;
		for (slot, given) in context[context.len() - used..].iter().enumerate() {
			ids[skip + slot] = self.vocabulary.id(given);
		}
		(ids, width)
	}

	/// Folds `token` and `context` into a key of the model order.
	fn key(&self, token: &str, context: &[&str]) -> NGram {
		let (mut ids, width) = self.fold_context(context);
		ids[width] = self.vocabulary.id(token);
		NGram::new(&ids[..=width])
	}
}
