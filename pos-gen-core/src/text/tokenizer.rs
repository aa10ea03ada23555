use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::tagger::Tagger;
use crate::errors::{GenError, Result};

/// Pattern separating words inside a line.
static WORD_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid word split pattern"));

/// A surface word together with its inferred grammatical category.
///
/// Two tokens with the same word but different tags are different tokens:
/// "run" as a verb and "run" as a noun lead to different continuations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AugmentedToken {
	word: String,
	tag: String,
}

impl AugmentedToken {
	pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
		Self { word: word.into(), tag: tag.into() }
	}

	/// The surface form.
	pub fn word(&self) -> &str {
		&self.word
	}

	/// The part-of-speech tag.
	pub fn tag(&self) -> &str {
		&self.tag
	}
}

impl fmt::Display for AugmentedToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.word, self.tag)
	}
}

/// Splits a line into surface words.
///
/// Leading and trailing whitespace never produce empty words.
pub fn split_words(line: &str) -> Vec<&str> {
	let line = line.trim();
	if line.is_empty() {
		return Vec::new();
	}
	WORD_SPLIT.split(line).collect()
}

/// Splits a line into words and tags them as a whole sentence.
///
/// # Errors
/// Returns [`GenError::TaggerMismatch`] if the tagger does not return
/// exactly one tag per word.
pub fn tokenize<T: Tagger + ?Sized>(line: &str, tagger: &T) -> Result<Vec<AugmentedToken>> {
	let words = split_words(line);
	if words.is_empty() {
		return Ok(Vec::new());
	}

	let tags = tagger.tag(&words);
	if tags.len() != words.len() {
		return Err(GenError::TaggerMismatch { words: words.len(), tags: tags.len() });
	}

	Ok(words.into_iter().zip(tags).map(|(word, tag)| AugmentedToken::new(word, tag)).collect())
}

/// Rebuilds surface text from tokens, dropping their tags.
pub fn detokenize<'a, I>(tokens: I) -> String
where
	I: IntoIterator<Item = &'a AugmentedToken>,
{
	let mut text = String::new();
	for token in tokens {
		if !text.is_empty() {
			text.push(' ');
		}
		text.push_str(token.word());
	}
	text
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::text::tagger::RuleTagger;

	struct Broken;

	impl Tagger for Broken {
		fn tag(&self, _words: &[&str]) -> Vec<String> {
			vec!["NN".to_owned()]
		}
	}

	#[test]
	fn split_ignores_surrounding_and_repeated_whitespace() {
		assert_eq!(split_words("  the   cat\tsat \n"), vec!["the", "cat", "sat"]);
		assert!(split_words("   ").is_empty());
	}

	#[test]
	fn tokenize_keeps_one_token_per_word() {
		let tokens = tokenize("the cat sat on the mat", &RuleTagger::default()).unwrap();
		assert_eq!(tokens.len(), 6);
		assert_eq!(tokens[0], AugmentedToken::new("the", "DT"));
		assert_eq!(tokens[3].tag(), "IN");
	}

	#[test]
	fn detokenize_recovers_the_words() {
		let line = "Hello   there, general Kenobi!";
		let tokens = tokenize(line, &RuleTagger::default()).unwrap();
		assert_eq!(detokenize(&tokens), "Hello there, general Kenobi!");
		assert_eq!(detokenize(&Vec::<AugmentedToken>::new()), "");
	}

	#[test]
	fn tagger_length_mismatch_is_an_error() {
		let err = tokenize("two words", &Broken).unwrap_err();
		assert!(matches!(err, GenError::TaggerMismatch { words: 2, tags: 1 }));
	}

	#[test]
	fn same_word_with_different_tags_differs() {
		let verb = AugmentedToken::new("run", "VB");
		let noun = AugmentedToken::new("run", "NN");
		assert_ne!(verb, noun);
		assert_eq!(verb.to_string(), "run/VB");
	}
}
