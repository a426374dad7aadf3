use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading corpora, training models or evaluating them.
#[derive(Error, Debug)]
pub enum Error {
	/// Reading or writing a corpus file failed. Never retried.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The evaluated table holds no token transitions, so perplexity would
	/// divide by zero.
	#[error("empty corpus: {what} has no token transitions to evaluate")]
	EmptyCorpus { what: &'static str },

	/// Unknown model order, invalid split ratio and similar caller mistakes.
	#[error("invalid configuration: {0}")]
	Configuration(String),
}

pub(crate) fn configuration<S: Into<String>>(msg: S) -> Error {
	Error::Configuration(msg.into())
}
