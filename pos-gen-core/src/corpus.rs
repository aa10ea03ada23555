use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::Result;
use crate::io::{read_json, read_lines};

/// Line separator inside a single text, surrounding blanks included.
static LINE_SPLIT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid line split pattern"));

/// Lines that are likely quoted or parenthesised fragments rather than sentences.
static MALFORMED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(^')|('$)|\s'|'\s|["()\[\]]"#).expect("valid rejection pattern"));

/// Ordered training lines.
///
/// Every line is an independent training sequence: no transition is ever
/// learned across two lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	lines: Vec<String>,
}

impl Corpus {
	/// Uses the given lines as they are.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { lines: lines.into_iter().map(Into::into).collect() }
	}

	/// Builds a corpus from whole texts (one per prior status).
	///
	/// Each text is trimmed and split on its line breaks, so a multi-line
	/// status contributes several lines.
	pub fn from_texts<I, S>(texts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut lines = Vec::new();
		for text in texts {
			let text = text.as_ref().trim();
			if text.is_empty() {
				continue;
			}
			lines.extend(LINE_SPLIT.split(text).map(str::to_owned));
		}
		Self { lines }
	}

	/// Loads a JSON file holding an array of texts.
	///
	/// # Errors
	/// Fails if the file cannot be read or is not an array of strings.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let texts: Vec<String> = read_json(path)?;
		Ok(Self::from_texts(texts))
	}

	/// Loads a plain text file, one line per training sequence.
	pub fn from_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		Ok(Self::from_lines(read_lines(path)?))
	}

	pub fn lines(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

/// Whether a line is fit for training.
///
/// Rejects blank lines, and lines with quotes, parentheses or brackets,
/// which usually come from quoted fragments that produce broken output.
pub fn is_well_formed(line: &str) -> bool {
	!line.trim().is_empty() && !MALFORMED.is_match(line)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn texts_are_trimmed_and_split_on_newlines() {
		let corpus = Corpus::from_texts(["  first tweet  ", "two\n  lines ", "", "   "]);
		assert_eq!(corpus.lines().collect::<Vec<_>>(), vec!["first tweet", "two", "lines"]);
	}

	#[test]
	fn json_corpus_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"["hello world", "bye\nnow"]"#).unwrap();

		let corpus = Corpus::from_json_file(file.path()).unwrap();
		assert_eq!(corpus.len(), 3);
	}

	#[test]
	fn json_corpus_must_be_strings() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{"not": "an array"}}"#).unwrap();

		assert!(Corpus::from_json_file(file.path()).is_err());
	}

	#[test]
	fn text_corpus_file_keeps_lines() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "one line").unwrap();
		writeln!(file, "another line").unwrap();

		let corpus = Corpus::from_text_file(file.path()).unwrap();
		assert_eq!(corpus.lines().collect::<Vec<_>>(), vec!["one line", "another line"]);
	}

	#[test]
	fn screening_rejects_quotes_and_brackets() {
		assert!(is_well_formed("it's a fine day"));
		assert!(is_well_formed("the cat sat on the mat"));
		assert!(!is_well_formed(""));
		assert!(!is_well_formed("   "));
		assert!(!is_well_formed("he said \"hi\""));
		assert!(!is_well_formed("a (small) thing"));
		assert!(!is_well_formed("'quoted start"));
		assert!(!is_well_formed("a 'word here"));
		assert!(!is_well_formed("list [1]"));
	}
}
