//! Sentence generation from a corpus of short texts.
//!
//! This crate provides a Markov chain text generator working on
//! part-of-speech–tagged words, including:
//! - Word splitting and shallow part-of-speech tagging
//! - Transition model construction from a corpus of lines
//! - Constrained sampling (length limit, retry budget, step cap)
//! - Filtering of the generated text before publication
//!
//! ```no_run
//! use pos_gen_core::corpus::Corpus;
//! use pos_gen_core::model::chain::BuildOptions;
//! use pos_gen_core::model::generation_input::GenerationInput;
//! use pos_gen_core::model::generator::Generator;
//! use pos_gen_core::text::RuleTagger;
//!
//! let corpus = Corpus::from_json_file("data/corpus.json")?;
//! let generator = Generator::build(&corpus, RuleTagger::default(), &BuildOptions::default())?;
//! println!("{}", generator.generate(&GenerationInput::with_max_chars(280))?);
//! # Ok::<(), pos_gen_core::errors::GenError>(())
//! ```

/// Configuration file structures.
pub mod config;

/// Corpus loading and line screening.
pub mod corpus;

/// Error types.
pub mod errors;

/// Markov chain, sampling and generation parameters.
pub mod model;

/// Tokenization, tagging and publication filter.
pub mod text;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;
