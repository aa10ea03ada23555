use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::Result;
use crate::io::read_to_string;
use crate::model::chain::{BuildOptions, DEFAULT_STATE_SIZE};
use crate::model::generation_input::{GenerationInput, Originality};

/// Whole configuration file. Every table and field is optional.
///
/// ```toml
/// [generation]
/// state_size = 2
/// max_chars = 280
///
/// [corpus]
/// path = "data/corpus.json"
///
/// [publish]
/// endpoint = "https://api.twitter.com/2/tweets"
/// token_env = "ACCESS_TOKEN"
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub generation: GenerationConfig,
	pub corpus: CorpusConfig,
	pub publish: PublishConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
	pub state_size: usize,
	pub max_chars: usize,
	pub tries: usize,
	pub max_steps: usize,
	/// Skip corpus lines with quotes, parentheses or brackets.
	pub well_formed: bool,
	/// Reject sentences copying too much of the corpus.
	pub test_output: bool,
	pub max_overlap_ratio: f32,
	pub max_overlap_total: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		let input = GenerationInput::default();
		let originality = Originality::default();
		Self {
			state_size: DEFAULT_STATE_SIZE,
			max_chars: input.max_chars,
			tries: input.tries,
			max_steps: input.max_steps,
			well_formed: true,
			test_output: false,
			max_overlap_ratio: originality.max_overlap_ratio,
			max_overlap_total: originality.max_overlap_total,
		}
	}
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
	/// JSON array of prior texts, or a plain text file when `json` is false.
	pub path: PathBuf,
	pub json: bool,
	/// Extra tagger lexicon (JSON object `word -> tag`).
	pub lexicon: Option<PathBuf>,
}

impl Default for CorpusConfig {
	fn default() -> Self {
		Self { path: PathBuf::from("data/corpus.json"), json: true, lexicon: None }
	}
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
	/// Status creation endpoint.
	pub endpoint: String,
	/// Name of the environment variable holding the bearer token.
	pub token_env: String,
	pub timeout_secs: u64,
}

impl Default for PublishConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://api.twitter.com/2/tweets".to_owned(),
			token_env: "ACCESS_TOKEN".to_owned(),
			timeout_secs: 10,
		}
	}
}

impl Config {
	/// Reads a TOML configuration file.
	///
	/// # Errors
	/// Fails if the file cannot be read or contains unknown or mistyped keys.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		Self::from_toml_str(&read_to_string(path)?)
	}

	pub fn from_toml_str(contents: &str) -> Result<Self> {
		Ok(toml::from_str(contents)?)
	}
}

impl GenerationConfig {
	pub fn build_options(&self) -> BuildOptions {
		BuildOptions { state_size: self.state_size, well_formed: self.well_formed }
	}

	/// Generation parameters, validated.
	pub fn generation_input(&self) -> Result<GenerationInput> {
		let mut input = GenerationInput {
			max_chars: self.max_chars,
			tries: self.tries,
			max_steps: self.max_steps,
			..GenerationInput::default()
		};
		if self.test_output {
			input.set_originality(self.max_overlap_ratio, self.max_overlap_total)?;
		}
		input.validate()?;
		Ok(input)
	}
}
