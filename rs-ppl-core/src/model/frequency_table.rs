use std::collections::BTreeMap;

use super::ngram::{MAX_ORDER, NGram, Order, TokenId};

/// Count table over every (context, token) pair of one order.
///
/// Logically dense: its index domain is `domain_size ^ order` cells, fixed
/// at construction from the vocabulary size. Only observed cells are
/// stored; every other cell reads as the base value, which is 1 with
/// additive smoothing and 0 without.
///
/// # Invariants
/// - `total() == windows scanned + base * cells()`
/// - Every key has exactly `order` ids, each below `domain_size`
#[derive(Clone, Debug)]
pub struct FrequencyTable {
	order: Order,
	domain_size: usize,
	base: u64,
	/// Real observations only, pseudo-counts excluded.
	observed: BTreeMap<NGram, u64>,
	observed_total: u64,
}

impl FrequencyTable {
	pub fn new(order: Order, domain_size: usize, smoothing: bool) -> Self {
		Self {
			order,
			domain_size,
			base: if smoothing { 1 } else { 0 },
			observed: BTreeMap::new(),
			observed_total: 0,
		}
	}

	/// Builds a table by scanning every adjacent window of `order` ids in
	/// every sequence. Sequences shorter than the order contribute nothing.
	pub fn from_sequences(order: Order, domain_size: usize, smoothing: bool, sequences: &[Vec<TokenId>]) -> Self {
		let mut table = Self::new(order, domain_size, smoothing);
		for sequence in sequences {
			for window in sequence.windows(order.value()) {
				table.increment(NGram::new(window));
			}
		}
		table
	}

	pub fn order(&self) -> Order {
		self.order
	}

	pub fn domain_size(&self) -> usize {
		self.domain_size
	}

	pub fn is_smoothed(&self) -> bool {
		self.base > 0
	}

	/// Adds one observation of `key`.
	pub fn increment(&mut self, key: NGram) {
		debug_assert_eq!(key.len(), self.order.value(), "key order does not match table order");
		debug_assert!(
			key.ids().iter().all(|id| (*id as usize) < self.domain_size),
			"key outside of the table domain"
		);
		*self.observed.entry(key).or_insert(0) += 1;
		self.observed_total += 1;
	}

	/// Stored count of `key`, pseudo-count included.
	pub fn count(&self, key: NGram) -> u64 {
		self.base + self.observed(key)
	}

	/// Number of real observations of `key`.
	pub fn observed(&self, key: NGram) -> u64 {
		self.observed.get(&key).copied().unwrap_or(0)
	}

	/// Number of windows scanned into the table.
	pub fn observed_total(&self) -> u64 {
		self.observed_total
	}

	/// Number of cells in the declared domain.
	pub fn cells(&self) -> u64 {
		(self.domain_size as u64).pow(self.order.value() as u32)
	}

	/// Sum of every cell over the declared domain.
	pub fn total(&self) -> u64 {
		self.observed_total + self.base * self.cells()
	}

	/// Iterates over every cell with a nonzero count, in key order.
	///
	/// Without smoothing this is the observed cells. With smoothing every
	/// cell of the domain is nonzero, so the whole domain is walked.
	pub fn nonzero_cells(&self) -> Box<dyn Iterator<Item = (NGram, u64)> + '_> {
		if self.base == 0 {
			Box::new(self.observed.iter().map(|(key, count)| (*key, *count)))
		} else {
			Box::new((0..self.cells()).map(move |index| {
				let key = self.key_at(index);
				(key, self.count(key))
			}))
		}
	}

	/// Decodes a flat cell index into its key, first id most significant.
	fn key_at(&self, mut index: u64) -> NGram {
		let n = self.order.value();
		let domain = self.domain_size as u64;
		let mut ids = [0 as TokenId; MAX_ORDER];
		for slot in (0..n).rev() {
			ids[slot] = (index % domain) as TokenId;
			index /= domain;
		}
		NGram::new(&ids[..n])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sequences() -> Vec<Vec<TokenId>> {
		vec![vec![0, 3, 4, 1], vec![0, 3, 1], vec![0, 1]]
	}

	#[test]
	fn total_matches_scanned_windows() {
		let table = FrequencyTable::from_sequences(Order::Bigram, 5, false, &sequences());
		assert_eq!(table.total(), 3 + 2 + 1);
		assert_eq!(table.count(NGram::new(&[0, 3])), 2);
		assert_eq!(table.count(NGram::new(&[3, 0])), 0);
	}

	#[test]
	fn smoothing_seeds_every_cell() {
		let table = FrequencyTable::from_sequences(Order::Bigram, 5, true, &sequences());
		assert_eq!(table.cells(), 25);
		assert_eq!(table.total(), 6 + 25);
		assert_eq!(table.count(NGram::new(&[0, 3])), 3);
		assert_eq!(table.observed(NGram::new(&[0, 3])), 2);
		assert_eq!(table.count(NGram::new(&[3, 0])), 1);
	}

	#[test]
	fn empty_smoothed_table_already_holds_pseudo_counts() {
		let table = FrequencyTable::new(Order::Trigram, 4, true);
		assert_eq!(table.observed_total(), 0);
		assert_eq!(table.total(), 64);
	}

	#[test]
	fn nonzero_cells_sum_to_total() {
		for smoothing in [false, true] {
			let table = FrequencyTable::from_sequences(Order::Trigram, 5, smoothing, &sequences());
			let sum: u64 = table.nonzero_cells().map(|(_, count)| count).sum();
			assert_eq!(sum, table.total());
			assert!(table.nonzero_cells().all(|(key, count)| count > 0 && key.len() == 3));
		}
	}

	#[test]
	fn smoothed_walk_visits_each_cell_once() {
		let table = FrequencyTable::new(Order::Bigram, 3, true);
		let keys: Vec<NGram> = table.nonzero_cells().map(|(key, _)| key).collect();
		assert_eq!(keys.len(), 9);
		assert_eq!(keys[0], NGram::new(&[0, 0]));
		assert_eq!(keys[5], NGram::new(&[1, 2]));
		assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
	}

	#[test]
	fn short_sequences_contribute_nothing() {
		let table = FrequencyTable::from_sequences(Order::Trigram, 5, false, &[vec![0, 1]]);
		assert_eq!(table.total(), 0);
	}
}
