use super::ngram::{Order, TokenId};
use super::vocabulary::{BOS_ID, EOS_ID, Vocabulary};
use crate::corpus::Corpus;

/// Maps every line of `corpus` to token ids, padded for `order`.
///
/// - Orders 2 and 3 get `order - 1` begin sentinels and one end sentinel
///   per line. Empty lines still get the full padding.
/// - Order 1 is not padded: the corpus is one stream of tokens and line
///   boundaries carry no information.
/// - Tokens outside `vocabulary` (rare in training, or never seen) are
///   rewritten to the OOV id.
pub fn pad_sequences(corpus: &Corpus, order: Order, vocabulary: &Vocabulary) -> Vec<Vec<TokenId>> {
	match order {
		Order::Unigram => vec![corpus.tokens().map(|token| vocabulary.id(token)).collect()],
		Order::Bigram | Order::Trigram => corpus
			.sentences()
			.map(|tokens| pad_sentence(&tokens, order, vocabulary))
			.collect(),
	}
}

fn pad_sentence(tokens: &[&str], order: Order, vocabulary: &Vocabulary) -> Vec<TokenId> {
	let begin = order.value() - 1;
	let mut padded = Vec::with_capacity(tokens.len() + begin + 1);
	padded.extend(std::iter::repeat(BOS_ID).take(begin));
	padded.extend(tokens.iter().map(|token| vocabulary.id(token)));
	padded.push(EOS_ID);
	padded
}
