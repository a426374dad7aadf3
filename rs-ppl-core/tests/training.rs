use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_ppl_core::corpus::split_file;
use rs_ppl_core::{Corpus, Error, EvaluationSet, ModelConfig, NGramModel, OOV, Order};
use tempfile::tempdir;

fn write(path: &Path, lines: &[&str]) {
	let mut contents = String::new();
	for line in lines {
		contents.push_str(line);
		contents.push_str(" \n");
	}
	fs::write(path, contents).expect("write corpus");
}

fn phoneme_lines() -> Vec<&'static str> {
	let mut lines = Vec::new();
	for _ in 0..20 {
		lines.push("HH AH0 L OW1");
		lines.push("W ER1 L D");
		lines.push("HH EH1 L OW1");
	}
	lines.push("<UNK> ZH");
	lines
}

#[test]
fn models_train_from_files_with_trailing_space_lines() {
	let dir = tempdir().unwrap();
	let training = dir.path().join("training.txt");
	write(&training, &phoneme_lines());

	let config = ModelConfig::default().with_oov_threshold(5);
	let model = NGramModel::from_file(Order::Bigram, &training, config).unwrap();

	assert!(model.vocabulary().contains("HH"));
	assert!(model.vocabulary().is_rare("ZH"));
	assert!(!model.vocabulary().kept().any(|token| token.is_empty()));
	assert_eq!(model.unigram_count("L"), 60);
	assert_eq!(model.unigram_count("ZH"), model.unigram_count(OOV));
	assert_eq!(model.unigram_count(OOV), 2);
}

#[test]
fn held_out_file_evaluation_matches_in_memory_evaluation() {
	let dir = tempdir().unwrap();
	let training = dir.path().join("training.txt");
	let held_out = dir.path().join("dev.txt");
	write(&training, &phoneme_lines());
	write(&held_out, &["HH AH0 L D", "W ER1 L OW1", "ZH ZH"]);

	for order in Order::ALL {
		for smoothing in [false, true] {
			let config = ModelConfig::default().with_oov_threshold(5).with_smoothing(smoothing);
			let model = NGramModel::from_file(order, &training, config).unwrap();
			let from_file = model.evaluate_file(&held_out).unwrap();
			let in_memory = model
				.evaluate(EvaluationSet::HeldOut(&Corpus::from_file(&held_out).unwrap()))
				.unwrap();
			assert_eq!(from_file, in_memory);
			assert!(from_file.perplexity.is_finite());
		}
	}
}

#[test]
fn trigram_training_perplexity_is_not_above_held_out() {
	let dir = tempdir().unwrap();
	let training = dir.path().join("training.txt");
	write(&training, &phoneme_lines());

	let model = NGramModel::from_file(Order::Trigram, &training, ModelConfig::default().with_oov_threshold(5)).unwrap();
	let training_ppl = model.perplexity(EvaluationSet::Training).unwrap();
	let held_out = Corpus::from_lines(["ZH Q", "W ER1 L D", "HH EH1 L D"]);
	let held_out_ppl = model.perplexity(EvaluationSet::HeldOut(&held_out)).unwrap();
	assert!(training_ppl <= held_out_ppl, "{} > {}", training_ppl, held_out_ppl);
}

#[test]
fn missing_corpus_propagates_io_error() {
	let dir = tempdir().unwrap();
	let result = NGramModel::from_file(Order::Unigram, dir.path().join("absent.txt"), ModelConfig::default());
	assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn empty_held_out_file_is_an_error() {
	let dir = tempdir().unwrap();
	let training = dir.path().join("training.txt");
	let empty = dir.path().join("empty.txt");
	write(&training, &phoneme_lines());
	fs::write(&empty, "").unwrap();

	let model = NGramModel::from_file(Order::Unigram, &training, ModelConfig::default()).unwrap();
	assert!(matches!(model.evaluate_file(&empty), Err(Error::EmptyCorpus { .. })));
}

#[test]
fn split_file_writes_both_sides() {
	let dir = tempdir().unwrap();
	let input = dir.path().join("all.txt");
	let training = dir.path().join("training.txt");
	let held_out = dir.path().join("dev.txt");
	let lines: Vec<String> = (0..50).map(|i| format!("T{} X", i)).collect();
	fs::write(&input, lines.join("\n")).unwrap();

	let mut rng = StdRng::seed_from_u64(42);
	let summary = split_file(&input, &training, &held_out, 0.8, &mut rng).unwrap();
	assert_eq!(summary.total, 50);

	let training = Corpus::from_file(&training).unwrap();
	let held_out = Corpus::from_file(&held_out).unwrap();
	assert_eq!(training.len(), summary.training);
	assert_eq!(held_out.len(), summary.held_out);

	let mut rejoined: Vec<String> = training.lines().iter().chain(held_out.lines()).cloned().collect();
	rejoined.sort();
	let mut expected = lines.clone();
	expected.sort();
	assert_eq!(rejoined, expected);
}
