//! Conversational Markov-chain text generation library.
//!
//! This crate provides a small statistical chatbot core including:
//! - Word/punctuation tokenization of training text
//! - Order-1 and order-2 word-transition tables
//! - Seed selection from a bounded window of recent user inputs
//! - Bounded random-walk reply generation with output formatting
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Typed errors and the crate-wide `Result` alias.
pub mod error;

/// I/O utilities (corpus loading, directory listing).
pub mod io;

/// Core transition models, context tracking and generation logic.
///
/// This module exposes the high-level session interface while keeping
/// internal successor-list representations private.
pub mod model;
