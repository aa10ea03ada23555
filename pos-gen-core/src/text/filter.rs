use std::sync::LazyLock;

use regex::Regex;

use crate::errors::FilterError;

/// Marker introducing a mention of another account.
pub const MENTION_MARKER: char = '@';

/// Characters that may not start a published text.
const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Shortened links inserted by the publishing service.
static SHORT_LINK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"https://t\.co/\S+").expect("valid short link pattern"));

/// Makes generated text safe to publish.
///
/// - Drops leading words starting with a mention marker or terminal punctuation
/// - Removes every remaining mention marker
/// - Removes shortened links
///
/// The steps are repeated until the text is stable, so filtering already
/// filtered text returns it unchanged. Spacing left where a link was removed
/// is kept as is.
///
/// # Errors
/// Returns [`FilterError::Empty`] when nothing is left to publish.
pub fn filter_for_publication(text: &str) -> Result<String, FilterError> {
	let mut current = text.trim().to_owned();

	loop {
		let next = filter_pass(&current);
		if next.is_empty() {
			return Err(FilterError::Empty);
		}
		if next == current {
			return Ok(next);
		}
		current = next;
	}
}

fn filter_pass(text: &str) -> String {
	let text = strip_leading_words(text).replace(MENTION_MARKER, "");
	SHORT_LINK.replace_all(&text, "").trim().to_owned()
}

/// Removes leading words that must not open a status.
///
/// Bounded by the number of words: returns an empty slice when every word
/// has to go.
fn strip_leading_words(text: &str) -> &str {
	let mut rest = text.trim_start();
	while rest.starts_with(MENTION_MARKER) || rest.starts_with(TERMINAL_PUNCTUATION) {
		rest = match rest.find(char::is_whitespace) {
			Some(end) => rest[end..].trim_start(),
			None => "",
		};
	}
	rest
}
