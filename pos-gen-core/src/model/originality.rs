use super::generation_input::Originality;

/// Checks that a sentence does not copy a long run of the corpus.
///
/// The allowed overlap is `min(max_overlap_total, round(ratio * words))`;
/// the sentence fails if any run of one more word than that appears,
/// rejoined with single spaces, in `source_text`.
pub(crate) fn is_original(words: &[&str], source_text: &str, limits: &Originality) -> bool {
	if words.is_empty() {
		return true;
	}

	let by_ratio = (limits.max_overlap_ratio * words.len() as f32).round() as usize;
	let overlap_max = limits.max_overlap_total.min(by_ratio);
	let overlap_over = overlap_max + 1;
	let gram_count = words.len().saturating_sub(overlap_max).max(1);

	(0..gram_count).all(|start| {
		let end = (start + overlap_over).min(words.len());
		!source_text.contains(&words[start..end].join(" "))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const SOURCE: &str = "the cat sat on the mat\nthe dog sat on the rug";

	fn check(sentence: &str) -> bool {
		let words: Vec<&str> = sentence.split(' ').collect();
		is_original(&words, SOURCE, &Originality::default())
	}

	#[test]
	fn copied_line_is_rejected() {
		assert!(!check("the cat sat on the mat"));
	}

	#[test]
	fn long_shared_run_is_rejected() {
		// 6 words allow a 4 word overlap, "the cat sat on the" is 5
		assert!(!check("the cat sat on the rug"));
	}

	#[test]
	fn short_shared_runs_are_fine() {
		assert!(check("a cat sat on a red rug today"));
	}

	#[test]
	fn total_cap_applies_to_long_sentences() {
		let limits = Originality { max_overlap_ratio: 1.0, max_overlap_total: 2 };
		let words = ["the", "dog", "sat", "quietly"];
		assert!(!is_original(&words, SOURCE, &limits));

		let words = ["the", "dog", "ran", "quietly"];
		assert!(is_original(&words, SOURCE, &limits));
	}
}
