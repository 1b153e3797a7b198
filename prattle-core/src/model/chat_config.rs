use crate::error::{ChatError, Result};

/// Default number of remembered user inputs.
pub const DEFAULT_CONTEXT_CAPACITY: usize = 5;

/// Default bound on walk steps per generated reply.
pub const DEFAULT_MAX_TOKENS: usize = 20;

/// Caller-tunable parameters for one conversation.
///
/// # Invariants
/// - `context_capacity` and `max_tokens` are both >= 1; out-of-range
///   values are rejected at the setter boundary.
///
/// # Notes
/// - The context capacity is applied when the owning session is created;
///   the token bound is read on every generation call.
#[derive(Clone, Debug)]
pub struct ChatConfig {
	/// Size of the context window (number of retained user inputs).
	context_capacity: usize,

	/// Maximum walk steps per reply; the finished sequence holds at most
	/// `max_tokens + 2` tokens including the two seed tokens.
	max_tokens: usize,
}

impl Default for ChatConfig {
	fn default() -> Self {
		Self {
			context_capacity: DEFAULT_CONTEXT_CAPACITY,
			max_tokens: DEFAULT_MAX_TOKENS,
		}
	}
}

impl ChatConfig {
	/// Returns the context window capacity.
	pub fn context_capacity(&self) -> usize {
		self.context_capacity
	}

	/// Returns the per-reply walk bound.
	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	/// Sets the context window capacity.
	///
	/// # Errors
	/// Returns an error if `capacity` is zero.
	pub fn set_context_capacity(&mut self, capacity: usize) -> Result<()> {
		if capacity == 0 {
			return Err(ChatError::InvalidConfig(
				"context capacity must be at least 1".to_owned(),
			));
		}
		self.context_capacity = capacity;
		Ok(())
	}

	/// Sets the per-reply walk bound.
	///
	/// # Errors
	/// Returns an error if `max_tokens` is zero.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> Result<()> {
		if max_tokens == 0 {
			return Err(ChatError::InvalidConfig(
				"max tokens must be at least 1".to_owned(),
			));
		}
		self.max_tokens = max_tokens;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_documented_values() {
		let config = ChatConfig::default();
		assert_eq!(config.context_capacity(), 5);
		assert_eq!(config.max_tokens(), 20);
	}

	#[test]
	fn rejects_zero_values() {
		let mut config = ChatConfig::default();
		assert!(matches!(config.set_context_capacity(0), Err(ChatError::InvalidConfig(_))));
		assert!(matches!(config.set_max_tokens(0), Err(ChatError::InvalidConfig(_))));

		// Failed setters leave the previous values in place.
		assert_eq!(config.context_capacity(), 5);
		assert_eq!(config.max_tokens(), 20);
	}

	#[test]
	fn accepts_positive_values() {
		let mut config = ChatConfig::default();
		config.set_context_capacity(8).unwrap();
		config.set_max_tokens(40).unwrap();
		assert_eq!(config.context_capacity(), 8);
		assert_eq!(config.max_tokens(), 40);
	}
}
