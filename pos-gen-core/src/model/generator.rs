use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use super::chain::{BuildOptions, TransitionModel, Walk};
use super::generation_input::{GenerationInput, StartSeed};
use super::originality::is_original;
use super::state::Slot;
use crate::corpus::Corpus;
use crate::errors::{GenError, Result};
use crate::text::tokenizer::split_words;
use crate::text::{detokenize, filter_for_publication, tokenize, AugmentedToken, Tagger};

/// High-level sentence generator.
///
/// # Responsibilities
/// - Own the read-only `TransitionModel` and the tagger it was built with
/// - Choose starting states according to `StartSeed`
/// - Retry walks until one yields a publishable sentence within the limits
///
/// All randomness comes from the RNG given by the caller, so a seeded RNG
/// reproduces the same sentences.
pub struct Generator {
	model: TransitionModel,
	tagger: Box<dyn Tagger + Send + Sync>,
}

impl std::fmt::Debug for Generator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Generator").field("model", &self.model).finish_non_exhaustive()
	}
}

impl Generator {
	/// Wraps an existing model. `tagger` must be the one the model was built with.
	pub fn new<T: Tagger + Send + Sync + 'static>(model: TransitionModel, tagger: T) -> Self {
		Self { model, tagger: Box::new(tagger) }
	}

	/// Tags the corpus and builds the chain.
	///
	/// # Errors
	/// See [`TransitionModel::build`].
	pub fn build<T: Tagger + Send + Sync + 'static>(corpus: &Corpus, tagger: T, options: &BuildOptions) -> Result<Self> {
		let model = TransitionModel::build(corpus, &tagger, options)?;
		Ok(Self::new(model, tagger))
	}

	pub fn model(&self) -> &TransitionModel {
		&self.model
	}

	/// Generates a publishable sentence using the thread-local RNG.
	pub fn generate(&self, input: &GenerationInput) -> Result<String> {
		self.make_short_sentence(input, &mut rand::rng())
	}

	/// Generates a filtered sentence of at most `input.max_chars` characters.
	///
	/// # Behavior
	/// - Each try walks the chain from a starting state chosen by `start_seed`.
	/// - A candidate is discarded, never truncated, when its walk hits the
	///   step cap, when the publication filter leaves nothing, when it is too
	///   long, or when it copies too much of the corpus.
	///
	/// # Errors
	/// - [`GenError::InvalidParameter`] / [`GenError::UnknownStart`] for bad inputs
	/// - [`GenError::GenerationFailed`] when all `tries` candidates were rejected
	pub fn make_short_sentence<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		input.validate()?;
		let init_states = self.init_states(&input.start_seed, rng)?;

		for attempt in 0..input.tries {
			let init = &init_states[attempt % init_states.len()];
			if let Some(text) = self.attempt(init, input, rng) {
				return Ok(text);
			}
		}

		warn!("no acceptable sentence after {} tries", input.tries);
		Err(GenError::GenerationFailed { tries: input.tries })
	}

	/// Runs one walk and applies every output check.
	fn attempt<R: Rng + ?Sized>(&self, init: &[Slot], input: &GenerationInput, rng: &mut R) -> Option<String> {
		let generated = match self.model.walk(init, input.max_steps, rng) {
			Walk::Complete(tokens) => tokens,
			Walk::Truncated => {
				debug!("candidate discarded: more than {} steps", input.max_steps);
				return None;
			}
			Walk::Stuck => {
				debug!("candidate discarded: walk reached an unknown state");
				return None;
			}
		};

		let tokens: Vec<&AugmentedToken> = init.iter().filter_map(Slot::token).chain(&generated).collect();
		let raw = detokenize(tokens.iter().copied());

		if let Some(limits) = &input.originality {
			let words: Vec<&str> = tokens.iter().map(|token| token.word()).collect();
			if !is_original(&words, self.model.source_text(), limits) {
				debug!("candidate discarded: too close to the corpus: {raw:?}");
				return None;
			}
		}

		let text = match filter_for_publication(&raw) {
			Ok(text) => text,
			Err(e) => {
				debug!("candidate discarded: {e}: {raw:?}");
				return None;
			}
		};

		let length = text.chars().count();
		if length > input.max_chars {
			debug!("candidate discarded: {length} chars > {}", input.max_chars);
			return None;
		}

		Some(text)
	}

	/// Starting states for the requested seed, in the order they are tried.
	fn init_states<R: Rng + ?Sized>(&self, seed: &StartSeed, rng: &mut R) -> Result<Vec<Vec<Slot>>> {
		match seed {
			StartSeed::Random => Ok(vec![self.model.begin_state()]),
			StartSeed::Custom(beginning) => {
				let tokens = tokenize(beginning, &*self.tagger)?;
				let state = self.padded_state(beginning, tokens)?;
				if self.model.transitions(&state).is_none() {
					return Err(GenError::UnknownStart(beginning.clone()));
				}
				Ok(vec![state])
			}
			StartSeed::Loose(beginning) => {
				let words = split_words(beginning);
				self.check_seed_length(beginning, words.len())?;

				let mut states: Vec<Vec<Slot>> = self
					.model
					.states()
					.filter(|(state, _)| {
						let leading: Vec<&str> = state.iter().filter_map(Slot::token).map(AugmentedToken::word).collect();
						leading.len() >= words.len() && leading[..words.len()] == words[..]
					})
					.map(|(state, _)| state.to_vec())
					.collect();

				if states.is_empty() {
					return Err(GenError::UnknownStart(beginning.clone()));
				}
				states.sort();
				states.shuffle(rng);
				Ok(states)
			}
		}
	}

	/// Left-pads seed tokens with begin markers up to the state size.
	fn padded_state(&self, beginning: &str, tokens: Vec<AugmentedToken>) -> Result<Vec<Slot>> {
		self.check_seed_length(beginning, tokens.len())?;

		let padding = self.model.state_size() - tokens.len();
		let mut state = vec![Slot::Begin; padding];
		state.extend(tokens.into_iter().map(Slot::Token));
		Ok(state)
	}

	fn check_seed_length(&self, beginning: &str, words: usize) -> Result<()> {
		let state_size = self.model.state_size();
		if words == 0 || words > state_size {
			return Err(GenError::InvalidParameter(format!(
				"start phrase must contain 1 to {state_size} words, {beginning:?} has {words}"
			)));
		}
		Ok(())
	}
}
