use std::path::Path;

use log::info;
use rand::Rng;

use crate::error::{Result, configuration};
use crate::io::{read_file, write_lines};

/// Share of lines sent to the training side when splitting a corpus.
pub const DEFAULT_TRAINING_RATIO: f64 = 0.8;

/// A token-line corpus, one utterance per line.
///
/// Lines are kept verbatim so that a split writes them back unchanged.
/// Tokens are produced on demand by splitting on whitespace, which makes the
/// upstream `"tok tok \n"` format and plain `"tok tok"` lines equivalent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	lines: Vec<String>,
}

impl Corpus {
	/// Loads a corpus file fully into memory.
	///
	/// # Errors
	/// Any read failure is returned as [`crate::Error::Io`].
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let lines = read_file(&path)?;
		info!("loaded {} lines from {}", lines.len(), path.as_ref().display());
		Ok(Self { lines })
	}

	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { lines: lines.into_iter().map(Into::into).collect() }
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Iterates over the tokens of every line, line by line.
	pub fn sentences(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
		self.lines.iter().map(|line| line.split_whitespace().collect())
	}

	/// Iterates over every raw token of the corpus, ignoring line boundaries.
	pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
		self.lines.iter().flat_map(|line| line.split_whitespace())
	}

	/// Writes the corpus back to disk, one line per utterance.
	pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		write_lines(path, &self.lines)?;
		Ok(())
	}

	/// Splits the corpus into a training part and a held-out part.
	///
	/// Each line independently goes to the training side with probability
	/// `ratio`, otherwise to the held-out side. Line order is preserved on
	/// both sides.
	///
	/// # Errors
	/// Returns a configuration error if `ratio` is not within `[0.0, 1.0]`.
	pub fn split<R: Rng + ?Sized>(&self, ratio: f64, rng: &mut R) -> Result<(Corpus, Corpus)> {
		if !(0.0..=1.0).contains(&ratio) {
			return Err(configuration(format!("split ratio must be between 0.0 and 1.0, got {}", ratio)));
		}

		let mut training = Vec::new();
		let mut held_out = Vec::new();
		for line in &self.lines {
			if rng.random::<f64>() < ratio {
				training.push(line.clone());
			} else {
				held_out.push(line.clone());
			}
		}

		Ok((Corpus { lines: training }, Corpus { lines: held_out }))
	}
}

/// Line counts produced by a corpus split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitSummary {
	pub total: usize,
	pub training: usize,
	pub held_out: usize,
}

impl SplitSummary {
	pub fn new(training: &Corpus, held_out: &Corpus) -> Self {
		Self {
			total: training.len() + held_out.len(),
			training: training.len(),
			held_out: held_out.len(),
		}
	}

	/// Percentage of lines on the training side, rounded to 2 decimals.
	pub fn training_percentage(&self) -> f64 {
		percentage(self.training, self.total)
	}

	/// Percentage of lines on the held-out side, rounded to 2 decimals.
	pub fn held_out_percentage(&self) -> f64 {
		percentage(self.held_out, self.total)
	}
}

fn percentage(part: usize, total: usize) -> f64 {
	if total == 0 {
		return 0.0;
	}
	(10_000.0 * part as f64 / total as f64).round() / 100.0
}

/// Reads `input`, splits it with [`Corpus::split`] and writes both sides.
pub fn split_file<R, PI, PT, PH>(
	input: PI,
	training_path: PT,
	held_out_path: PH,
	ratio: f64,
	rng: &mut R,
) -> Result<SplitSummary>
where
	R: Rng + ?Sized,
	PI: AsRef<Path>,
	PT: AsRef<Path>,
	PH: AsRef<Path>,
{
	let corpus = Corpus::from_file(input)?;
	let (training, held_out) = corpus.split(ratio, rng)?;
	training.write(training_path)?;
	held_out.write(held_out_path)?;
	Ok(SplitSummary::new(&training, &held_out))
}
