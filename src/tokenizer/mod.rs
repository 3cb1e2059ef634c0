//! Text tokenization for callers holding raw text
//!
//! The index itself only consumes (term, position) pairs; this module is the
//! convenience layer that produces them.

mod tokenizer;

pub use tokenizer::Tokenizer;
