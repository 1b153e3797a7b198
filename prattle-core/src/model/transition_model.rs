use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::successors::Successors;
use super::tokenizer;
use crate::error::{ChatError, Result};
use crate::io;

/// Order-1 and order-2 word-transition tables built from a training corpus.
///
/// The order-1 table maps a single token to every token that followed it
/// anywhere in training; the order-2 table maps an ordered token pair to
/// every token that followed that exact pair.
///
/// # Responsibilities
/// - Build both tables in a single pass over the token sequence
/// - Answer read-only successor queries during generation
/// - Sample successors uniformly over the duplicate-preserving lists
///
/// # Invariants
/// - Every stored key has at least one successor
/// - Both tables are built once and never mutated afterward, so shared
///   read-only access from concurrent generation calls is safe
#[derive(Clone, Debug, Default)]
pub struct TransitionModel {
	/// Single token to its observed followers.
	order1: HashMap<String, Successors>,

	/// Ordered token pair to its observed followers.
	order2: HashMap<(String, String), Successors>,
}

impl TransitionModel {
	/// Creates an empty, safely-queryable model with no transitions.
	///
	/// Every lookup on an empty model answers `None` and `is_empty`
	/// reports true; generation against it fails explicitly rather
	/// than panicking.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds both transition tables from a token sequence.
	///
	/// # Behavior
	/// - For each adjacent pair `(t[i], t[i+1])`, records `t[i+1]` as an
	///   order-1 successor of `t[i]`.
	/// - For each adjacent triple, records `t[i+2]` as an order-2 successor
	///   of the pair `(t[i], t[i+1])`.
	/// - Single pass, O(n) time and space in the number of tokens.
	///
	/// # Notes
	/// - Sequences shorter than 2 tokens produce an empty model.
	pub fn train(tokens: &[String]) -> Self {
		let mut model = Self::new();

		for i in 0..tokens.len().saturating_sub(1) {
			model
				.order1
				.entry(tokens[i].clone())
				.or_default()
				.record(&tokens[i + 1]);

			if i + 2 < tokens.len() {
				model
					.order2
					.entry((tokens[i].clone(), tokens[i + 1].clone()))
					.or_default()
					.record(&tokens[i + 2]);
			}
		}

		model
	}

	/// Tokenizes raw text and builds a model from it.
	pub fn from_text(text: &str) -> Self {
		Self::train(&tokenizer::tokenize(text))
	}

	/// Reads a UTF-8 corpus file and builds a model from its contents.
	///
	/// # Errors
	/// Returns `ChatError::TrainingIo` if the corpus cannot be read. The
	/// caller is expected to recover by substituting `TransitionModel::new()`
	/// and reporting the condition once (see `ChatSession::from_corpus`).
	pub fn from_corpus<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let text = io::read_corpus(path)
			.map_err(|source| ChatError::training_io(source, Some(path.to_path_buf())))?;
		Ok(Self::from_text(&text))
	}

	/// True if the model holds no transitions at all.
	pub fn is_empty(&self) -> bool {
		self.order1.is_empty()
	}

	/// Number of distinct words in the order-1 table.
	pub fn distinct_words(&self) -> usize {
		self.order1.len()
	}

	/// Total number of recorded order-1 observations.
	pub fn observation_count(&self) -> usize {
		self.order1.values().map(Successors::len).sum()
	}

	/// True if `token` exists as an order-1 key.
	pub fn knows_word(&self, token: &str) -> bool {
		self.order1.contains_key(token)
	}

	/// Read-only view of the order-1 successor list for `token`.
	pub fn successors_of(&self, token: &str) -> Option<&[String]> {
		self.order1.get(token).map(Successors::as_slice)
	}

	/// Read-only view of the order-2 successor list for an exact pair.
	pub fn pair_successors(&self, first: &str, second: &str) -> Option<&[String]> {
		self.order2
			.get(&(first.to_owned(), second.to_owned()))
			.map(Successors::as_slice)
	}

	/// Samples one order-1 successor of `token` uniformly over its list.
	///
	/// Uniform-over-list sampling means a follower observed `k` times is
	/// drawn with `k` times the probability of one observed once.
	pub fn sample_after<R: Rng + ?Sized>(&self, token: &str, rng: &mut R) -> Option<&str> {
		self.order1.get(token)?.sample(rng)
	}

	/// Samples one order-2 successor of the exact pair `(first, second)`.
	///
	/// Returns `None` when the pair was never observed, which terminates
	/// the generation walk.
	pub fn sample_after_pair<R: Rng + ?Sized>(
		&self,
		first: &str,
		second: &str,
		rng: &mut R,
	) -> Option<&str> {
		self.order2.get(&(first.to_owned(), second.to_owned()))?.sample(rng)
	}

	/// Draws a uniformly random order-1 key.
	///
	/// Keys are sorted before sampling so that a seeded random source
	/// reproduces the same choice regardless of hash-map iteration order.
	/// Returns `None` on an empty model.
	pub fn random_known_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let mut keys: Vec<&str> = self.order1.keys().map(String::as_str).collect();
		keys.sort_unstable();
		keys.choose(rng).copied()
	}
}
