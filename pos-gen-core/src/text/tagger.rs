use std::collections::HashMap;
use std::path::Path;

use log::debug;

use crate::errors::Result;
use crate::io::read_json;

/// Part-of-speech classifier used to annotate words before modeling.
///
/// The whole word sequence of a line is given at once so implementations
/// can use the surrounding context. The returned vector must contain
/// exactly one tag per word.
pub trait Tagger {
	fn tag(&self, words: &[&str]) -> Vec<String>;
}

/// Closed-class words and frequent verbs, with Penn Treebank tags.
const LEXICON: &[(&str, &str)] = &[
	// Determiners
	("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
	("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
	("any", "DT"), ("no", "DT"), ("all", "DT"), ("both", "DT"), ("another", "DT"),
	// Pronouns
	("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
	("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
	("them", "PRP"), ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"),
	("its", "PRP$"), ("our", "PRP$"), ("their", "PRP$"),
	// Prepositions and subordinating conjunctions
	("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"),
	("for", "IN"), ("with", "IN"), ("from", "IN"), ("about", "IN"), ("as", "IN"),
	("into", "IN"), ("like", "IN"), ("through", "IN"), ("after", "IN"), ("over", "IN"),
	("between", "IN"), ("out", "IN"), ("against", "IN"), ("during", "IN"), ("without", "IN"),
	("before", "IN"), ("under", "IN"), ("around", "IN"), ("among", "IN"), ("than", "IN"),
	("because", "IN"), ("if", "IN"), ("while", "IN"), ("since", "IN"), ("until", "IN"),
	("although", "IN"), ("though", "IN"), ("upon", "IN"),
	("to", "TO"),
	// Coordinating conjunctions
	("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"), ("yet", "CC"),
	// Modals
	("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("shall", "MD"),
	("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"),
	// Auxiliaries and frequent verbs
	("is", "VBZ"), ("has", "VBZ"), ("does", "VBZ"),
	("am", "VBP"), ("are", "VBP"), ("have", "VBP"), ("do", "VBP"),
	("was", "VBD"), ("were", "VBD"), ("had", "VBD"), ("did", "VBD"), ("said", "VBD"),
	("got", "VBD"), ("went", "VBD"), ("made", "VBD"), ("came", "VBD"), ("sat", "VBD"),
	("be", "VB"), ("go", "VB"), ("get", "VB"), ("make", "VB"), ("take", "VB"),
	("see", "VB"), ("come", "VB"), ("know", "VB"), ("think", "VB"), ("say", "VB"),
	("want", "VB"), ("give", "VB"),
	("been", "VBN"), ("done", "VBN"), ("gone", "VBN"), ("seen", "VBN"), ("taken", "VBN"),
	("known", "VBN"),
	("being", "VBG"), ("having", "VBG"), ("doing", "VBG"), ("going", "VBG"),
	// Adverbs
	("not", "RB"), ("n't", "RB"), ("very", "RB"), ("too", "RB"), ("also", "RB"),
	("just", "RB"), ("now", "RB"), ("then", "RB"), ("here", "RB"), ("there", "RB"),
	("never", "RB"), ("always", "RB"), ("so", "RB"), ("still", "RB"), ("already", "RB"),
	("again", "RB"), ("really", "RB"), ("even", "RB"), ("only", "RB"), ("ever", "RB"),
	// Wh-words
	("what", "WP"), ("who", "WP"), ("whom", "WP"), ("which", "WDT"), ("when", "WRB"),
	("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
	// Frequent adjectives
	("good", "JJ"), ("bad", "JJ"), ("new", "JJ"), ("old", "JJ"), ("great", "JJ"),
	("big", "JJ"), ("small", "JJ"), ("little", "JJ"), ("high", "JJ"), ("long", "JJ"),
	("right", "JJ"), ("last", "JJ"), ("first", "JJ"), ("other", "JJ"), ("same", "JJ"),
	("few", "JJ"), ("many", "JJ"), ("much", "JJ"), ("more", "JJR"), ("most", "JJS"),
	// Interjections
	("oh", "UH"), ("ok", "UH"), ("okay", "UH"), ("hey", "UH"), ("wow", "UH"),
	("lol", "UH"), ("yes", "UH"), ("thanks", "UH"),
];

/// Suffix heuristics for words missing from the lexicon, tried in order.
const SUFFIXES: &[(&str, &str)] = &[
	("ing", "VBG"),
	("ed", "VBD"),
	("ly", "RB"),
	("tion", "NN"),
	("sion", "NN"),
	("ment", "NN"),
	("ness", "NN"),
	("ity", "NN"),
	("ship", "NN"),
	("ous", "JJ"),
	("ful", "JJ"),
	("able", "JJ"),
	("ible", "JJ"),
	("ive", "JJ"),
	("less", "JJ"),
	("ical", "JJ"),
	("est", "JJS"),
];

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having"];
const BE_FORMS: &[&str] = &["be", "is", "am", "are", "was", "were", "been", "being"];

/// Shallow rule-based tagger producing Penn Treebank style tags.
///
/// Tagging happens in two passes: every word first gets a tag from the
/// lexicon or from its shape, then a left-to-right contextual pass fixes
/// tags that contradict the previous word (a verb right after a determiner
/// becomes a noun, a past tense after "have" becomes a participle, ...).
#[derive(Clone, Debug)]
pub struct RuleTagger {
	lexicon: HashMap<String, String>,
}

impl Default for RuleTagger {
	/// A tagger using the built-in English lexicon.
	fn default() -> Self {
		Self::empty().with_entries(LEXICON.iter().map(|(word, tag)| (*word, *tag)))
	}
}

impl RuleTagger {
	/// A tagger relying on shape and suffix rules only.
	pub fn empty() -> Self {
		Self { lexicon: HashMap::new() }
	}

	/// Adds or overrides lexicon entries. Words are matched case-insensitively.
	pub fn with_entries<I, W, T>(mut self, entries: I) -> Self
	where
		I: IntoIterator<Item = (W, T)>,
		W: AsRef<str>,
		T: Into<String>,
	{
		for (word, tag) in entries {
			self.lexicon.insert(word.as_ref().to_lowercase(), tag.into());
		}
		self
	}

	/// Extends the lexicon from a JSON object mapping words to tags.
	///
	/// # Errors
	/// Fails if the file cannot be read or is not a `{ "word": "TAG" }` object.
	pub fn with_lexicon_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
		let entries: HashMap<String, String> = read_json(path.as_ref())?;
		debug!("loaded {} lexicon entries from {}", entries.len(), path.as_ref().display());
		Ok(self.with_entries(entries))
	}

	/// Number of lexicon entries.
	pub fn lexicon_len(&self) -> usize {
		self.lexicon.len()
	}

	fn initial_tag(&self, word: &str, position: usize) -> String {
		let core = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '@' && c != '#');
		if core.is_empty() {
			return punctuation_tag(word).to_owned();
		}

		let lower = core.to_lowercase();
		if let Some(tag) = self.lexicon.get(&lower) {
			return tag.clone();
		}

		if core.starts_with('@') || core.starts_with('#') {
			return "NNP".to_owned();
		}
		if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.") {
			return "NN".to_owned();
		}
		if core.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
			return "CD".to_owned();
		}
		if position > 0 && core.chars().next().is_some_and(char::is_uppercase) {
			return "NNP".to_owned();
		}

		for (suffix, tag) in SUFFIXES {
			if lower.len() > suffix.len() + 1 && lower.ends_with(suffix) {
				return (*tag).to_owned();
			}
		}
		if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
			return "NNS".to_owned();
		}

		"NN".to_owned()
	}
}

impl Tagger for RuleTagger {
	fn tag(&self, words: &[&str]) -> Vec<String> {
		let mut tags: Vec<String> = words
			.iter()
			.enumerate()
			.map(|(position, word)| self.initial_tag(word, position))
			.collect();

		for i in 1..tags.len() {
			let previous_word = words[i - 1].to_lowercase();
			if let Some(tag) = contextual_tag(&tags[i - 1], &previous_word, &tags[i]) {
				tags[i] = tag.to_owned();
			}
		}

		tags
	}
}

/// Tag for a token made only of punctuation.
fn punctuation_tag(word: &str) -> &'static str {
	if word.contains(['.', '!', '?']) {
		"."
	} else if word.contains(',') {
		","
	} else if word.contains([':', ';', '-']) {
		":"
	} else {
		"SYM"
	}
}

/// Returns the corrected tag of a word given the previous word, if any rule applies.
fn contextual_tag(previous_tag: &str, previous_word: &str, tag: &str) -> Option<&'static str> {
	match (previous_tag, tag) {
		("DT" | "PRP$", "VB" | "VBP") => Some("NN"),
		("TO", "VBP") => Some("VB"),
		("MD", "NN" | "VBP") => Some("VB"),
		(_, "VBD") if HAVE_FORMS.contains(&previous_word) => Some("VBN"),
		(_, "VBD") if BE_FORMS.contains(&previous_word) => Some("VBN"),
		("PRP", "NN") => Some("VBP"),
		("PRP", "NNS") => Some("VBZ"),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn tags(line: &str) -> Vec<String> {
		let words: Vec<&str> = line.split_whitespace().collect();
		RuleTagger::default().tag(&words)
	}

	#[test]
	fn lexicon_and_default_noun() {
		assert_eq!(tags("the cat sat on the mat"), vec!["DT", "NN", "VBD", "IN", "DT", "NN"]);
	}

	#[test]
	fn context_turns_nouns_into_verbs() {
		assert_eq!(tags("she runs quickly"), vec!["PRP", "VBZ", "RB"]);
		assert_eq!(tags("I can dance"), vec!["PRP", "MD", "VB"]);
	}

	#[test]
	fn past_tense_after_auxiliary_is_participle() {
		assert_eq!(tags("it was painted"), vec!["PRP", "VBD", "VBN"]);
		assert_eq!(tags("they have jumped"), vec!["PRP", "VBP", "VBN"]);
	}

	#[test]
	fn verb_after_determiner_is_a_noun() {
		assert_eq!(tags("the make"), vec!["DT", "NN"]);
	}

	#[test]
	fn shapes_of_unknown_words() {
		let tagged = tags("Hello @bob https://t.co/x 42 Paris !");
		assert_eq!(tagged, vec!["NN", "NNP", "NN", "CD", "NNP", "."]);
	}

	#[test]
	fn trailing_punctuation_does_not_hide_the_word() {
		assert_eq!(tags("the dog."), vec!["DT", "NN"]);
		assert_eq!(tags("wow, nice"), vec!["UH", "NN"]);
	}

	#[test]
	fn tagging_is_deterministic() {
		let line = "the quick brown fox jumped over the lazy dogs";
		assert_eq!(tags(line), tags(line));
	}

	#[test]
	fn lexicon_file_overrides_entries() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{"Mat": "NNX"}}"#).unwrap();

		let tagger = RuleTagger::default().with_lexicon_file(file.path()).unwrap();
		assert_eq!(tagger.tag(&["the", "mat"]), vec!["DT", "NNX"]);
		assert_eq!(tagger.lexicon_len(), RuleTagger::default().lexicon_len() + 1);
	}

	#[test]
	fn empty_tagger_still_tags_every_word() {
		let tagger = RuleTagger::empty();
		assert_eq!(tagger.tag(&["walking", "happily"]), vec!["VBG", "RB"]);
		assert!(tagger.tag(&[]).is_empty());
	}
}
