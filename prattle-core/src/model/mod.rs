//! Top-level module for the conversational generation system.
//!
//! This crate provides a two-order Markov reply generator, including:
//! - Word/punctuation tokenization (`tokenizer`)
//! - Order-1 and order-2 transition tables (`TransitionModel`)
//! - A bounded window of recent user inputs (`ContextTracker`)
//! - The random-walk reply generator (`generator`)
//! - Caller-tunable parameters (`ChatConfig`)
//! - A high-level per-conversation interface (`ChatSession`)

/// Caller-tunable generation parameters.
///
/// Stores the context window capacity and the per-reply token bound,
/// with validation at the setter boundary.
pub mod chat_config;

/// Bounded FIFO of recent user inputs and context-driven seed selection.
pub mod context;

/// Random-walk reply generation and output formatting.
///
/// Walks the order-2 table from a seeded two-token prefix and renders
/// the resulting sequence into presentable text.
pub mod generator;

/// High-level per-conversation interface.
///
/// Owns one trained model, one context window and one configuration,
/// and exposes a single `respond` operation per conversational turn.
pub mod session;

/// Tokenization of training text and conversational context.
pub mod tokenizer;

/// Order-1 and order-2 word-transition tables.
///
/// Handles corpus ingestion, transition recording and read-only
/// successor queries with uniform sampling.
pub mod transition_model;

/// Internal successor list for a single table key.
///
/// Preserves duplicate observations and supports uniform random sampling.
/// This module is not exposed publicly.
mod successors;
