use crate::errors::{GenError, Result};

/// Strategy used to select the starting state of a walk.
///
/// # Variants
/// - `Random`: start from the begin state, so the first word is drawn
///   according to how often each word opened a corpus line.
/// - `Custom(String)`: start with exactly these words (1 to `state_size`),
///   as if they opened a line.
/// - `Loose(String)`: start from any state whose first words are these,
///   wherever it appeared in a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
	Loose(String),
}

/// Limits on how much of a corpus line a generated sentence may copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Originality {
	/// Maximum copied run, as a share of the sentence length (0.0..=1.0).
	pub max_overlap_ratio: f32,

	/// Maximum copied run, in words.
	pub max_overlap_total: usize,
}

impl Default for Originality {
	fn default() -> Self {
		Self { max_overlap_ratio: 0.7, max_overlap_total: 15 }
	}
}

/// Parameters of a sentence generation.
///
/// # Invariants (checked by `validate`)
/// - `max_chars`, `tries` and `max_steps` are strictly positive
/// - `originality.max_overlap_ratio` is within 0.0..=1.0
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Maximum length of the published text, in characters.
	pub max_chars: usize,

	/// Number of candidates to try before giving up.
	pub tries: usize,

	/// Maximum number of tokens a single walk may generate.
	pub max_steps: usize,

	/// Where walks start.
	pub start_seed: StartSeed,

	/// Reject candidates copying too much of the corpus. Disabled when `None`.
	pub originality: Option<Originality>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			max_chars: 280,
			tries: 10,
			max_steps: 1000,
			start_seed: StartSeed::Random,
			originality: None,
		}
	}
}

impl GenerationInput {
	/// Default parameters with another length limit.
	pub fn with_max_chars(max_chars: usize) -> Self {
		Self { max_chars, ..Self::default() }
	}

	/// Enables the originality check.
	///
	/// # Errors
	/// Returns an error if the ratio is outside the valid range.
	pub fn set_originality(&mut self, max_overlap_ratio: f32, max_overlap_total: usize) -> Result<()> {
		if !(0.0..=1.0).contains(&max_overlap_ratio) {
			return Err(GenError::InvalidParameter(format!(
				"max_overlap_ratio must be between 0.0 and 1.0, got {max_overlap_ratio}"
			)));
		}
		self.originality = Some(Originality { max_overlap_ratio, max_overlap_total });
		Ok(())
	}

	/// Checks every invariant.
	pub fn validate(&self) -> Result<()> {
		for (name, value) in [("max_chars", self.max_chars), ("tries", self.tries), ("max_steps", self.max_steps)] {
			if value == 0 {
				return Err(GenError::InvalidParameter(format!("{name} must be >= 1")));
			}
		}
		if let Some(originality) = &self.originality {
			if !(0.0..=1.0).contains(&originality.max_overlap_ratio) {
				return Err(GenError::InvalidParameter(format!(
					"max_overlap_ratio must be between 0.0 and 1.0, got {}",
					originality.max_overlap_ratio
				)));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_fit_a_status() {
		let input = GenerationInput::default();
		assert_eq!(input.max_chars, 280);
		assert_eq!(input.tries, 10);
		assert_eq!(input.start_seed, StartSeed::Random);
		assert!(input.originality.is_none());
		assert!(input.validate().is_ok());
	}

	#[test]
	fn zero_budgets_are_invalid() {
		let mut input = GenerationInput::with_max_chars(0);
		assert!(input.validate().is_err());

		input.max_chars = 10;
		input.tries = 0;
		assert!(input.validate().is_err());

		input.tries = 1;
		input.max_steps = 0;
		assert!(input.validate().is_err());
	}

	#[test]
	fn originality_ratio_is_range_checked() {
		let mut input = GenerationInput::default();
		assert!(input.set_originality(1.5, 15).is_err());
		assert!(input.originality.is_none());

		input.set_originality(0.5, 8).unwrap();
		assert_eq!(input.originality, Some(Originality { max_overlap_ratio: 0.5, max_overlap_total: 8 }));

		input.originality = Some(Originality { max_overlap_ratio: -0.1, max_overlap_total: 8 });
		assert!(input.validate().is_err());
	}
}
