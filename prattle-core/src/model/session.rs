use std::path::Path;

use log::{info, warn};
use rand::Rng;

use super::chat_config::ChatConfig;
use super::context::ContextTracker;
use super::generator;
use super::transition_model::TransitionModel;
use crate::error::Result;

/// High-level interface for one conversation.
///
/// # Responsibilities
/// - Own the trained `TransitionModel`, the per-conversation
///   `ContextTracker` and the active `ChatConfig`
/// - Turn one user input into one formatted reply per call
/// - Recover from an unreadable corpus with an empty model, keeping the
///   rendered error available for one-time reporting by the shell
///
/// # Notes
/// - The model is built once and only read afterward; all mutable state
///   lives in the context window. Concurrent conversations must each own
///   an independent session.
pub struct ChatSession {
	model: TransitionModel,
	context: ContextTracker,
	config: ChatConfig,
	training_error: Option<String>,
}

impl ChatSession {
	/// Creates a session around an already-built model.
	pub fn new(model: TransitionModel, config: ChatConfig) -> Self {
		let context = ContextTracker::new(config.context_capacity());
		Self {
			model,
			context,
			config,
			training_error: None,
		}
	}

	/// Creates a session by training on a corpus file.
	///
	/// # Behavior
	/// - On success, builds both transition tables in one pass and logs
	///   the indexed vocabulary size.
	/// - On read failure, logs a warning, substitutes an empty model and
	///   retains the rendered error. The session stays usable: every
	///   `respond` call then reports `ChatError::EmptyModel` instead of
	///   crashing.
	pub fn from_corpus<P: AsRef<Path>>(path: P, config: ChatConfig) -> Self {
		let path = path.as_ref();
		match TransitionModel::from_corpus(path) {
			Ok(model) => {
				info!(
					"indexed corpus {}: {} distinct words, {} observations",
					path.display(),
					model.distinct_words(),
					model.observation_count()
				);
				Self::new(model, config)
			}
			Err(error) => {
				warn!("failed to index corpus {}: {error}", path.display());
				let mut session = Self::new(TransitionModel::new(), config);
				session.training_error = Some(error.to_string());
				session
			}
		}
	}

	/// The training failure retained by `from_corpus`, if any.
	///
	/// Shells report this once at startup.
	pub fn training_error(&self) -> Option<&str> {
		self.training_error.as_deref()
	}

	/// Read-only access to the trained model.
	pub fn model(&self) -> &TransitionModel {
		&self.model
	}

	/// Read-only access to the active configuration.
	pub fn config(&self) -> &ChatConfig {
		&self.config
	}

	/// Number of distinct words in the order-1 table.
	pub fn distinct_words(&self) -> usize {
		self.model.distinct_words()
	}

	/// Number of user inputs currently retained in the context window.
	pub fn context_depth(&self) -> usize {
		self.context.len()
	}

	/// Adjusts the per-reply walk bound for subsequent turns.
	///
	/// # Errors
	/// Returns an error if `max_tokens` is zero.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> Result<()> {
		self.config.set_max_tokens(max_tokens)
	}

	/// Produces one reply for one conversational turn.
	///
	/// Records the input in the context window (even when the model is
	/// empty, so context survives a later retrain), selects the seed from
	/// recent context and walks the transition tables.
	///
	/// # Errors
	/// Returns `ChatError::EmptyModel` when no training data is available.
	/// Dead ends during the walk are not errors and yield the partial
	/// sequence.
	pub fn respond_with<R: Rng + ?Sized>(&mut self, input: &str, rng: &mut R) -> Result<String> {
		self.context.record_input(input);
		let seed = self.context.select_seed(&self.model, rng)?;
		generator::generate(&self.model, &seed, self.config.max_tokens(), rng)
	}

	/// `respond_with` using the thread-local random source.
	pub fn respond(&mut self, input: &str) -> Result<String> {
		self.respond_with(input, &mut rand::rng())
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::error::ChatError;

	#[test]
	fn responds_from_recent_context() {
		let model = TransitionModel::from_text("the cat sat on the mat.");
		let mut session = ChatSession::new(model, ChatConfig::default());

		let mut rng = StdRng::seed_from_u64(4);
		let reply = session.respond_with("tell me about the cat", &mut rng).unwrap();

		// Seed is "cat", the most recent trained context word.
		assert!(reply.starts_with("Cat"), "unexpected reply: {reply}");
		assert_eq!(session.context_depth(), 1);
	}

	#[test]
	fn identical_sessions_and_sources_produce_identical_replies() {
		let corpus = "alice saw the white rabbit. the rabbit ran! alice ran after it.";

		let mut first = ChatSession::new(TransitionModel::from_text(corpus), ChatConfig::default());
		let mut second = ChatSession::new(TransitionModel::from_text(corpus), ChatConfig::default());

		let reply_a = first.respond_with("alice", &mut StdRng::seed_from_u64(21)).unwrap();
		let reply_b = second.respond_with("alice", &mut StdRng::seed_from_u64(21)).unwrap();
		assert_eq!(reply_a, reply_b);
	}

	#[test]
	fn untrained_session_reports_empty_model_but_keeps_context() {
		let mut session = ChatSession::new(TransitionModel::new(), ChatConfig::default());

		let mut rng = StdRng::seed_from_u64(0);
		for turn in 0..3 {
			let result = session.respond_with(&format!("turn {turn}"), &mut rng);
			assert!(matches!(result, Err(ChatError::EmptyModel)));
		}
		assert_eq!(session.context_depth(), 3);
	}

	#[test]
	fn context_window_honors_configured_capacity() {
		let mut config = ChatConfig::default();
		config.set_context_capacity(2).unwrap();
		let model = TransitionModel::from_text("a b a b a b");
		let mut session = ChatSession::new(model, config);

		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..5 {
			let _ = session.respond_with("a b", &mut rng);
		}
		assert_eq!(session.context_depth(), 2);
	}

	#[test]
	fn failed_training_is_recovered_and_reported() {
		let session = ChatSession::from_corpus("no/such/corpus.txt", ChatConfig::default());
		assert!(session.training_error().is_some());
		assert_eq!(session.distinct_words(), 0);
		assert!(session.model().is_empty());
	}
}
