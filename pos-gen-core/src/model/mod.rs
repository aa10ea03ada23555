//! Markov chain over part-of-speech–tagged tokens.
//!
//! This module provides:
//! - Chain states and their weighted transitions (`state`)
//! - The transition model built from a corpus (`chain`)
//! - Generation parameters (`generation_input`)
//! - A high-level generation interface (`generator`)

/// Transition model construction and raw walks.
///
/// Handles line padding, transition counting and step-capped walks.
pub mod chain;

/// Parameters of a sentence generation: length limit, retry budget,
/// step cap, start seed and originality limits.
pub mod generation_input;

/// High-level interface producing publishable sentences.
///
/// Exposes model building and constrained generation with retries.
pub mod generator;

/// Overlap check between generated sentences and the corpus.
mod originality;

/// Chain state slots and weighted transitions.
pub mod state;
