use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

use super::tokenizer;
use super::transition_model::TransitionModel;
use crate::error::{ChatError, Result};

/// Collapses the space left before a terminator by the plain join.
fn terminator_spacing() -> &'static Regex {
	static SPACING_RE: OnceLock<Regex> = OnceLock::new();
	SPACING_RE.get_or_init(|| Regex::new(r"\s+([.!?])").expect("spacing pattern is valid"))
}

/// Generates one formatted reply anchored at `seed`.
///
/// # Behavior
/// - Samples the second token uniformly from the seed's order-1 successors,
///   starting the sequence as `[seed, second]`.
/// - Walks up to `max_tokens` steps, keying the order-2 table with the last
///   two tokens each time. A sampled terminator ends the walk; an unseen
///   pair ends it immediately. There is no order-1 fallback once walking:
///   a dead second-order transition stops generation outright even when a
///   first-order continuation would exist. That asymmetry with seeding is
///   part of the observable output distribution and must stay.
/// - The finished sequence never exceeds `max_tokens + 2` tokens and is
///   rendered through `format_reply`.
///
/// # Errors
/// - `ChatError::EmptyModel` when the model has no transitions.
/// - `ChatError::UnknownSeed` when `seed` is missing from the order-1
///   table; seeds obtained through `ContextTracker::select_seed` are
///   always present.
pub fn generate<R: Rng + ?Sized>(
	model: &TransitionModel,
	seed: &str,
	max_tokens: usize,
	rng: &mut R,
) -> Result<String> {
	if model.is_empty() {
		return Err(ChatError::EmptyModel);
	}

	let second = model
		.sample_after(seed, rng)
		.ok_or_else(|| ChatError::UnknownSeed(seed.to_owned()))?
		.to_owned();

	let mut sequence = vec![seed.to_owned(), second];

	for _ in 0..max_tokens {
		let first = &sequence[sequence.len() - 2];
		let last = &sequence[sequence.len() - 1];

		let next = match model.sample_after_pair(first, last, rng) {
			Some(next) => next.to_owned(),
			// Dead end: a normal terminal state, not an error.
			None => break,
		};

		let terminal = tokenizer::is_terminator(&next);
		sequence.push(next);
		if terminal {
			break;
		}
	}

	Ok(format_reply(&sequence))
}

/// Renders a token sequence into presentable text.
///
/// Joins tokens with single spaces, uppercases the first character and
/// removes the space left before each terminator. Cosmetic only: token
/// content is never altered.
pub fn format_reply(tokens: &[String]) -> String {
	let joined = tokens.join(" ");

	let capitalized = match joined.chars().next() {
		Some(first) => first.to_uppercase().collect::<String>() + &joined[first.len_utf8()..],
		None => return String::new(),
	};

	terminator_spacing().replace_all(&capitalized, "$1").into_owned()
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn tokens(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| (*w).to_owned()).collect()
	}

	#[test]
	fn formats_with_leading_capital_and_tight_terminators() {
		assert_eq!(format_reply(&tokens(&["hello", "world", "."])), "Hello world.");
		assert_eq!(format_reply(&tokens(&["wait", "what", "?", "!"])), "Wait what?!");
		assert_eq!(format_reply(&[]), "");
	}

	#[test]
	fn walks_a_deterministic_chain_to_the_terminator() {
		// Every key has exactly one successor, so the walk is forced.
		let model = TransitionModel::from_text("the cat sat.");
		let mut rng = StdRng::seed_from_u64(0);

		let reply = generate(&model, "the", 20, &mut rng).unwrap();
		assert_eq!(reply, "The cat sat.");
	}

	#[test]
	fn stops_at_a_dead_second_order_transition() {
		// After ["cat", "sat"] no pair key exists; the partial sequence
		// is returned as-is even though order-1 knows a continuation.
		let model = TransitionModel::train(&tokens(&["cat", "sat", "cat", "ran"]));
		let mut rng = StdRng::seed_from_u64(1);

		let reply = generate(&model, "sat", 20, &mut rng).unwrap();
		assert_eq!(reply, "Sat cat ran");
	}

	#[test]
	fn is_deterministic_under_a_fixed_source() {
		let model = TransitionModel::from_text(
			"alice saw the rabbit. the rabbit ran away! alice followed the rabbit down.",
		);

		let one = generate(&model, "alice", 20, &mut StdRng::seed_from_u64(42)).unwrap();
		let two = generate(&model, "alice", 20, &mut StdRng::seed_from_u64(42)).unwrap();
		assert_eq!(one, two);
	}

	#[test]
	fn never_exceeds_the_length_bound() {
		// A single looping pair never terminates on its own.
		let model = TransitionModel::from_text("go go go go go go go go");
		let mut rng = StdRng::seed_from_u64(5);

		let reply = generate(&model, "go", 4, &mut rng).unwrap();
		let words: Vec<&str> = reply.split_whitespace().collect();
		assert_eq!(words.len(), 4 + 2);
	}

	#[test]
	fn stops_at_the_first_terminator_sampled_inside_the_walk() {
		// Every choice is forced: the second token is already ".", the
		// terminator check only applies once the walk proper begins.
		let model = TransitionModel::from_text("well. well. well. well.");
		let mut rng = StdRng::seed_from_u64(2);

		let reply = generate(&model, "well", 20, &mut rng).unwrap();
		assert_eq!(reply, "Well. well.");
	}

	#[test]
	fn empty_model_and_unknown_seed_fail_explicitly() {
		let empty = TransitionModel::new();
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(generate(&empty, "cat", 20, &mut rng), Err(ChatError::EmptyModel)));

		let model = TransitionModel::from_text("the cat sat.");
		assert!(matches!(
			generate(&model, "unseen", 20, &mut rng),
			Err(ChatError::UnknownSeed(_))
		));
	}
}
