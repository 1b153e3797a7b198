use std::collections::VecDeque;

use rand::Rng;

use super::tokenizer;
use super::transition_model::TransitionModel;
use crate::error::{ChatError, Result};

/// Bounded FIFO of recent user inputs, used to anchor replies in context.
///
/// # Responsibilities
/// - Retain the last `capacity` raw user inputs, lowercased, oldest evicted
/// - Derive the seed token for the next reply from that window
///
/// # Invariants
/// - Holds at most `capacity` entries at all times, most-recent last
///
/// One tracker belongs to exactly one conversation; concurrent
/// conversations must each own their own instance.
#[derive(Clone, Debug)]
pub struct ContextTracker {
	/// Recent inputs, oldest first.
	window: VecDeque<String>,

	/// Maximum number of retained inputs.
	capacity: usize,
}

impl ContextTracker {
	/// Creates an empty tracker retaining up to `capacity` inputs.
	pub fn new(capacity: usize) -> Self {
		Self {
			window: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	/// Appends one user input to the window, evicting the oldest entry
	/// beyond capacity. Input is lowercased on the way in.
	pub fn record_input(&mut self, text: &str) {
		self.window.push_back(text.to_lowercase());
		while self.window.len() > self.capacity {
			self.window.pop_front();
		}
	}

	/// Number of inputs currently retained.
	pub fn len(&self) -> usize {
		self.window.len()
	}

	/// True if no inputs have been recorded yet.
	pub fn is_empty(&self) -> bool {
		self.window.is_empty()
	}

	/// Read-only view of the retained inputs, oldest first.
	pub fn entries(&self) -> impl Iterator<Item = &str> {
		self.window.iter().map(String::as_str)
	}

	/// Picks the seed token anchoring the next reply.
	///
	/// # Behavior
	/// - Joins the window entries with spaces and splits them with the
	///   word-only seed rule (`tokenizer::seed_words`).
	/// - Scans the resulting words from the end backward and returns the
	///   first one present in the order-1 table: the most recent words are
	///   the most contextually relevant, so the latest match wins over
	///   earlier ones.
	/// - Falls back to a uniformly random order-1 key when nothing in the
	///   window matches; reproducible under a seeded random source.
	///
	/// # Errors
	/// Returns `ChatError::EmptyModel` only when the order-1 table itself
	/// is empty (untrained or failed-training model).
	pub fn select_seed<R: Rng + ?Sized>(
		&self,
		model: &TransitionModel,
		rng: &mut R,
	) -> Result<String> {
		if model.is_empty() {
			return Err(ChatError::EmptyModel);
		}

		let joined = self
			.window
			.iter()
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(" ");

		for word in tokenizer::seed_words(&joined).iter().rev() {
			if model.knows_word(word) {
				return Ok(word.clone());
			}
		}

		model
			.random_known_word(rng)
			.map(str::to_owned)
			.ok_or(ChatError::EmptyModel)
	}
}
