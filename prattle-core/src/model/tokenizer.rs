use std::sync::OnceLock;

use regex::Regex;

/// Token pattern for training and generation: maximal runs of word
/// characters and apostrophes, or a single sentence terminator.
///
/// Apostrophes are kept inside word runs so contractions like "can't"
/// stay one token. Every other character is discarded.
fn token_pattern() -> &'static Regex {
	static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
	TOKEN_RE.get_or_init(|| Regex::new(r"[\w']+|[.!?]").expect("token pattern is valid"))
}

/// Word pattern for seed selection: plain word runs, no punctuation tokens.
///
/// Seed selection deliberately uses a simpler boundary rule than training
/// tokenization. The two must not be unified: doing so would change which
/// context words are eligible as seeds.
fn seed_word_pattern() -> &'static Regex {
	static SEED_WORD_RE: OnceLock<Regex> = OnceLock::new();
	SEED_WORD_RE.get_or_init(|| Regex::new(r"\b\w+\b").expect("seed word pattern is valid"))
}

/// Splits raw text into a sequence of word and punctuation tokens.
///
/// # Behavior
/// - Lowercases the entire input before scanning.
/// - Emits, in source order, word runs (with apostrophes) and standalone
///   `.` / `!` / `?` tokens; everything else is dropped.
/// - Deterministic, no side effects. Empty or whitespace-only input
///   produces an empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	token_pattern()
		.find_iter(&lowered)
		.map(|token| token.as_str().to_owned())
		.collect()
}

/// Splits conversational context into the plain words eligible as seeds.
///
/// Unlike `tokenize`, apostrophes break words here ("can't" yields "can"
/// and "t") and terminators are not emitted at all.
pub fn seed_words(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	seed_word_pattern()
		.find_iter(&lowered)
		.map(|word| word.as_str().to_owned())
		.collect()
}

/// Returns true if `token` is a sentence terminator (`.`, `!` or `?`).
pub fn is_terminator(token: &str) -> bool {
	matches!(token, "." | "!" | "?")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_preserves_contractions_and_isolates_terminators() {
		assert_eq!(
			tokenize("Alice's cat sat. It ran!"),
			vec!["alice's", "cat", "sat", ".", "it", "ran", "!"]
		);
	}

	#[test]
	fn empty_and_whitespace_input_yield_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("  \t\n ").is_empty());
	}

	#[test]
	fn non_terminator_punctuation_is_discarded() {
		assert_eq!(tokenize("well, then: go (now)?"), vec!["well", "then", "go", "now", "?"]);
	}

	#[test]
	fn consecutive_terminators_stay_standalone() {
		assert_eq!(tokenize("what?!"), vec!["what", "?", "!"]);
	}

	#[test]
	fn seed_words_split_contractions_and_drop_punctuation() {
		assert_eq!(seed_words("Can't stop. Won't stop!"), vec!["can", "t", "stop", "won", "t", "stop"]);
	}

	#[test]
	fn recognizes_terminators() {
		assert!(is_terminator("."));
		assert!(is_terminator("!"));
		assert!(is_terminator("?"));
		assert!(!is_terminator("cat"));
		assert!(!is_terminator(","));
	}
}
