use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};

/// Ratio of counts behind one conditional probability.
///
/// `count` is the numerator cell and `denominator` the normalizing count of
/// its context, both already including pseudo-counts when smoothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Estimate {
	pub count: u64,
	pub denominator: u64,
}

impl Estimate {
	/// `count / denominator`, or 0.0 when the context was never seen.
	pub fn probability(&self) -> f64 {
		if self.denominator == 0 {
			return 0.0;
		}
		self.count as f64 / self.denominator as f64
	}

	/// `-ln(count / denominator)`, computed as a difference of logs.
	fn cost(&self) -> f64 {
		(self.denominator as f64).ln() - (self.count as f64).ln()
	}
}

/// Why a cell was left out of the log-probability sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
	/// The context count is zero: the model has no distribution for it.
	MissingContext,
	/// The context exists but the cell count is zero and smoothing is off.
	/// The cell would cost infinity; it is excluded instead.
	UnsupportedZeroProbability,
}

/// Number of evaluated cells excluded from the sum, per reason.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
	pub missing_context: u64,
	pub unsupported_zero_probability: u64,
}

impl SkipCounts {
	pub fn total(&self) -> u64 {
		self.missing_context + self.unsupported_zero_probability
	}
}

/// Immutable result of one perplexity evaluation.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
	/// `exp(log_prob_sum / transitions)`.
	pub perplexity: f64,
	/// Sum of `-ln P(token | context) * count` over scored cells.
	pub log_prob_sum: f64,
	/// Total count of the evaluated table, skipped cells included.
	pub transitions: u64,
	pub scored_cells: u64,
	pub skipped: SkipCounts,
}

/// Folds weighted cell estimates into a perplexity.
///
/// Skipped cells add nothing to the sum but their weight stays in the
/// normalizer passed to [`LogProbAccumulator::finish`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProbAccumulator {
	log_prob_sum: f64,
	scored_cells: u64,
	skipped: SkipCounts,
}

impl LogProbAccumulator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `weight` observations of a cell estimated by `estimate`.
	///
	/// Returns the reason when the cell is skipped.
	pub fn add(&mut self, estimate: Estimate, weight: u64) -> Option<SkipReason> {
		if weight == 0 {
			return None;
		}
		if estimate.denominator == 0 {
			self.skipped.missing_context += 1;
			return Some(SkipReason::MissingContext);
		}
		if estimate.count == 0 {
			self.skipped.unsupported_zero_probability += 1;
			return Some(SkipReason::UnsupportedZeroProbability);
		}
		self.log_prob_sum += estimate.cost() * weight as f64;
		self.scored_cells += 1;
		None
	}

	/// Normalizes the sum by `transitions` and exponentiates it.
	///
	/// # Errors
	/// Returns [`Error::EmptyCorpus`] when `transitions` is zero; `what` names
	/// the evaluated corpus in the message.
	pub fn finish(self, transitions: u64, what: &'static str) -> Result<Evaluation> {
		if transitions == 0 {
			return Err(Error::EmptyCorpus { what });
		}
		if self.skipped.total() > 0 {
			debug!(
				"{}: skipped {} cells without context, {} zero-probability cells",
				what, self.skipped.missing_context, self.skipped.unsupported_zero_probability
			);
		}
		Ok(Evaluation {
			perplexity: (self.log_prob_sum / transitions as f64).exp(),
			log_prob_sum: self.log_prob_sum,
			transitions,
			scored_cells: self.scored_cells,
			skipped: self.skipped,
		})
	}
}
