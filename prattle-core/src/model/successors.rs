use rand::Rng;
use rand::seq::IndexedRandom;

/// Successor list for a single transition-table key.
///
/// Conceptually this is the outgoing edge set of a Markov-chain node,
/// except that edges are not collapsed into weighted entries: every
/// observation is appended as-is, in training order.
///
/// ## Invariants
/// - A token observed `k` times appears `k` times in the list, so uniform
///   sampling over the list is implicitly frequency-weighted. This encoding
///   is the defined semantics of the model and must not be replaced by an
///   occurrence-count map.
/// - Tables never store an empty `Successors`: the owning entry is created
///   together with its first observation.
#[derive(Clone, Debug, Default)]
pub(crate) struct Successors {
	/// Every observed follower, duplicates retained, insertion order preserved.
	observed: Vec<String>,
}

impl Successors {
	/// Records one observation of `next` following this key.
	pub(crate) fn record(&mut self, next: &str) {
		self.observed.push(next.to_owned());
	}

	/// Draws one successor uniformly over the observation list.
	///
	/// Returns `None` only for an empty list, which the table invariants
	/// rule out for stored entries.
	pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.observed.choose(rng).map(String::as_str)
	}

	/// Read-only view of the observation list.
	pub(crate) fn as_slice(&self) -> &[String] {
		&self.observed
	}

	/// Number of recorded observations (not distinct successors).
	pub(crate) fn len(&self) -> usize {
		self.observed.len()
	}
}
