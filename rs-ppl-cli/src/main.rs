//! Trains one n-gram model and reports its held-out perplexity.
//!
//! ```text
//! rs-ppl <unigram|bigram|trigram> <training> <held-out> [--laplace]
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::info;
use serde::Serialize;

use rs_ppl_core::{DEFAULT_OOV_THRESHOLD, Evaluation, EvaluationSet, ModelConfig, NGramModel, Order};

#[derive(Parser, Debug)]
#[command(name = "rs-ppl")]
#[command(about = "Train an n-gram language model and report its held-out perplexity")]
#[command(version)]
struct Args {
	/// Model order: unigram, bigram or trigram
	order: Order,

	/// Training corpus, one whitespace-tokenized utterance per line
	training: PathBuf,

	/// Held-out corpus, same format
	held_out: PathBuf,

	/// Enable additive (Laplace) smoothing
	#[arg(long)]
	laplace: bool,

	/// Tokens seen this many times or fewer fold into <UNK>
	#[arg(long, default_value_t = DEFAULT_OOV_THRESHOLD)]
	oov_threshold: usize,

	/// Also report the perplexity of the training corpus
	#[arg(long)]
	training_perplexity: bool,

	/// Print the report as JSON
	#[arg(long)]
	json: bool,
}

/// Everything printed for one run.
#[derive(Serialize, Debug)]
struct Report {
	order: Order,
	config: ModelConfig,
	held_out: Evaluation,
	#[serde(skip_serializing_if = "Option::is_none")]
	training: Option<Evaluation>,
}

impl Report {
	fn print(&self) {
		println!("N-gram type: {}", title_case(self.order.name()));
		if self.config.smoothing {
			println!("Smoothing: Laplace");
		} else {
			println!("Smoothing: None");
		}
		println!("Perplexity: {}", round5(self.held_out.perplexity));
		if let Some(training) = &self.training {
			println!("Training perplexity: {}", round5(training.perplexity));
		}
	}
}

fn title_case(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn round5(value: f64) -> f64 {
	(value * 100_000.0).round() / 100_000.0
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let args = Args::parse();

	let config = ModelConfig::default()
		.with_smoothing(args.laplace)
		.with_oov_threshold(args.oov_threshold);

	info!("training {} model on {}", args.order, args.training.display());
	let model = NGramModel::from_file(args.order, &args.training, config)?;

	let held_out = model.evaluate_file(&args.held_out)?;
	let training = if args.training_perplexity {
		Some(model.evaluate(EvaluationSet::Training)?)
	} else {
		None
	};

	let report = Report { order: args.order, config, held_out, training };
	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		report.print();
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positional_arguments_and_laplace_flag() {
		let args = Args::try_parse_from(["rs-ppl", "bigram", "train.txt", "dev.txt", "--laplace"]).unwrap();
		assert_eq!(args.order, Order::Bigram);
		assert!(args.laplace);
		assert_eq!(args.oov_threshold, DEFAULT_OOV_THRESHOLD);
	}

	#[test]
	fn missing_argument_is_a_usage_error() {
		assert!(Args::try_parse_from(["rs-ppl", "bigram", "train.txt"]).is_err());
	}

	#[test]
	fn unknown_order_is_rejected() {
		assert!(Args::try_parse_from(["rs-ppl", "fourgram", "train.txt", "dev.txt"]).is_err());
	}

	#[test]
	fn report_helpers() {
		assert_eq!(title_case("trigram"), "Trigram");
		assert_eq!(round5(1.234_567_89), 1.23457);
	}
}
