//! Text processing around the model.
//!
//! - Word splitting and part-of-speech tagging (`tokenizer`, `tagger`)
//! - Joining generated tokens back into text (`tokenizer::detokenize`)
//! - Cleaning generated text before it is published (`filter`)

/// Publication filter (mentions, leading punctuation, short links).
pub mod filter;

/// The `Tagger` trait and the built-in rule-based tagger.
pub mod tagger;

/// Augmented tokens, splitting and joining.
pub mod tokenizer;

pub use filter::filter_for_publication;
pub use tagger::{RuleTagger, Tagger};
pub use tokenizer::{detokenize, tokenize, AugmentedToken};
