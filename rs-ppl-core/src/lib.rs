//! Classical n-gram language models scored by perplexity.
//!
//! This crate provides:
//! - Out-of-vocabulary folding against a frequency threshold
//! - Sentence-boundary padding for bigram and trigram models
//! - Unigram, bigram and trigram models with optional Laplace smoothing
//! - Perplexity on the training corpus or on a held-out corpus
//! - Random train / held-out splitting of a token-line corpus
//!
//! Low-level file helpers are kept internal.

/// N-gram models, their tables and perplexity evaluation.
pub mod model;

/// Token-line corpora and train / held-out splitting.
pub mod corpus;

/// Model parameters and reserved symbols.
pub mod config;

/// Crate error type.
pub mod error;

/// I/O utilities (file loading and writing).
///
/// Not exposed
pub(crate) mod io;

pub use config::{BOS, DEFAULT_OOV_THRESHOLD, EOS, ModelConfig, OOV};
pub use corpus::{Corpus, SplitSummary};
pub use error::{Error, Result};
pub use model::{EvaluationSet, Evaluation, NGramModel, Order};
