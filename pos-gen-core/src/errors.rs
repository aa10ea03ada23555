//! Error types shared by the whole crate.

use std::path::PathBuf;

/// Result type used across the crate, defaulting to [`GenError`].
pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Failure of the publication filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
	/// Every word was a mention, a terminal punctuation mark or a link.
	#[error("nothing left to publish after filtering")]
	Empty,
}

/// Errors raised while building a model or generating from it.
///
/// Build-time variants (`EmptyCorpus`, `InvalidStateSize`, `TaggerMismatch`)
/// mean no model can exist. `GenerationFailed` only means this call ran out
/// of attempts and may be retried later.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
	/// The corpus had no usable line.
	#[error("corpus contains no usable line, no model can be built")]
	EmptyCorpus,

	/// The state size must be at least one token.
	#[error("state size must be >= 1, got {0}")]
	InvalidStateSize(usize),

	/// The tagger did not return one tag per word.
	#[error("tagger returned {tags} tags for {words} words")]
	TaggerMismatch { words: usize, tags: usize },

	/// A generation parameter is out of range.
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),

	/// The requested start phrase matches no state of the model.
	#[error("no state of the model starts with {0:?}")]
	UnknownStart(String),

	/// No candidate satisfied the output constraints.
	#[error("no acceptable sentence after {tries} tries")]
	GenerationFailed { tries: usize },

	#[error(transparent)]
	Filter(#[from] FilterError),

	/// A file could not be read.
	#[error("failed to read '{path}': {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Toml(#[from] toml::de::Error),
}

impl GenError {
	/// Whether the caller may simply try again later.
	pub fn is_retryable(&self) -> bool {
		matches!(self, GenError::GenerationFailed { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_generation_failure_is_retryable() {
		assert!(GenError::GenerationFailed { tries: 3 }.is_retryable());
		assert!(!GenError::EmptyCorpus.is_retryable());
		assert!(!GenError::Filter(FilterError::Empty).is_retryable());
	}

	#[test]
	fn messages_name_the_problem() {
		let err = GenError::TaggerMismatch { words: 3, tags: 2 };
		assert_eq!(err.to_string(), "tagger returned 2 tags for 3 words");
		assert_eq!(
			GenError::GenerationFailed { tries: 10 }.to_string(),
			"no acceptable sentence after 10 tries"
		);
	}
}
