use serde::{Deserialize, Serialize};

/// Begin-of-utterance sentinel.
pub const BOS: &str = "<s>";

/// End-of-utterance sentinel.
pub const EOS: &str = "</s>";

/// Out-of-vocabulary symbol every rare or unseen token folds into.
pub const OOV: &str = "<UNK>";

/// Tokens seen this many times or fewer in the training corpus fold into [`OOV`].
pub const DEFAULT_OOV_THRESHOLD: usize = 30;

/// Training parameters shared by every model order.
///
/// # Fields
/// - `oov_threshold`: a token is kept only if its raw frequency is strictly
///   greater than this value.
/// - `smoothing`: enables additive (Laplace) smoothing, every table cell
///   starts with a pseudo-count of 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
	pub oov_threshold: usize,
	pub smoothing: bool,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self { oov_threshold: DEFAULT_OOV_THRESHOLD, smoothing: false }
	}
}

impl ModelConfig {
	pub fn with_smoothing(mut self, smoothing: bool) -> Self {
		self.smoothing = smoothing;
		self
	}

	pub fn with_oov_threshold(mut self, oov_threshold: usize) -> Self {
		self.oov_threshold = oov_threshold;
		self
	}

	/// Pseudo-count every table cell starts with.
	pub(crate) fn base_count(&self) -> u64 {
		if self.smoothing { 1 } else { 0 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_threshold_is_thirty_without_smoothing() {
		let config = ModelConfig::default();
		assert_eq!(config.oov_threshold, 30);
		assert!(!config.smoothing);
		assert_eq!(config.base_count(), 0);
	}

	#[test]
	fn builders_override_fields() {
		let config = ModelConfig::default().with_smoothing(true).with_oov_threshold(0);
		assert_eq!(config, ModelConfig { oov_threshold: 0, smoothing: true });
		assert_eq!(config.base_count(), 1);
	}
}
