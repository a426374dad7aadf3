//! Randomly splits a token-line corpus into a training and a held-out file.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_ppl_core::SplitSummary;
use rs_ppl_core::corpus::{DEFAULT_TRAINING_RATIO, split_file};

#[derive(Parser, Debug)]
#[command(name = "rs-ppl-split")]
#[command(about = "Split a token-line corpus into training and held-out sets")]
#[command(version)]
struct Args {
	/// Corpus to split
	input: PathBuf,

	/// Output path of the training lines
	training: PathBuf,

	/// Output path of the held-out lines
	held_out: PathBuf,

	/// Probability for each line to go to the training set
	#[arg(long, default_value_t = DEFAULT_TRAINING_RATIO)]
	ratio: f64,

	/// Seed for a reproducible split
	#[arg(long)]
	seed: Option<u64>,
}

fn print_summary(summary: &SplitSummary) {
	println!("Total number of lines: {}", summary.total);
	println!("Number of training lines: {}", summary.training);
	println!("Number of held-out lines: {}", summary.held_out);
	println!("Percentage of training lines: {}%", summary.training_percentage());
	println!("Percentage of held-out lines: {}%", summary.held_out_percentage());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let args = Args::parse();

	let summary = match args.seed {
		Some(seed) => {
			let mut rng = StdRng::seed_from_u64(seed);
			split_file(&args.input, &args.training, &args.held_out, args.ratio, &mut rng)?
		}
		None => split_file(&args.input, &args.training, &args.held_out, args.ratio, &mut rand::rng())?,
	};

	print_summary(&summary);
	Ok(())
}
