//! Top-level module for the n-gram language models.
//!
//! Components, leaves first:
//! - Token ids, model orders and composite n-gram keys (`ngram`)
//! - OOV normalizer and closed vocabulary (`Vocabulary`)
//! - Sequence padder (`pad_sequences`)
//! - Dense-domain count tables (`FrequencyTable`)
//! - Unigram, bigram and trigram models (`NGramModel`)
//! - Perplexity aggregation (`LogProbAccumulator`, `Evaluation`)

/// Token ids, model orders and flat n-gram keys.
pub mod ngram;

/// OOV normalizer: splits tokens into kept and rare, interns the kept ones.
pub mod vocabulary;

/// Sentinel padding and OOV folding of corpus lines.
pub mod padding;

/// Count table over the full (context, token) domain of one order.
pub mod frequency_table;

/// Trained models, probability queries and perplexity evaluation.
pub mod ngram_model;

/// Log-probability aggregation shared by every order.
pub mod perplexity;

pub use frequency_table::FrequencyTable;
pub use ngram::{NGram, Order, TokenId};
pub use ngram_model::{EvaluationSet, NGramModel};
pub use perplexity::{Estimate, Evaluation, LogProbAccumulator, SkipCounts, SkipReason};
pub use vocabulary::Vocabulary;
