use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = ChatError> = std::result::Result<T, E>;

/// Domain-specific error describing failures during training, configuration
/// or reply generation.
///
/// A dead end during the generation walk is deliberately *not* represented
/// here: running out of transitions before the length bound is a normal
/// terminal state and yields the partial sequence instead of an error.
#[derive(Debug, Error)]
pub enum ChatError {
	/// The training corpus could not be read. Recoverable: the session
	/// substitutes an empty model and keeps serving.
	#[error("failed to read corpus {path:?}: {source}")]
	TrainingIo {
		/// Underlying IO error returned by the standard library.
		source: std::io::Error,
		/// Corpus path associated with the failure if available.
		path: Option<PathBuf>,
	},
	/// Generation or seed selection was requested against a model with no
	/// trained transitions.
	#[error("no training data available")]
	EmptyModel,
	/// A seed word outside the order-1 table reached the generator.
	#[error("seed {0:?} is not a trained word")]
	UnknownSeed(String),
	/// A configuration value failed validation.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

impl ChatError {
	/// Helper constructor that attaches the offending path when wrapping IO errors.
	pub fn training_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
		Self::TrainingIo { source, path }
	}
}
