use std::collections::HashMap;

use log::{debug, info};
use rand::Rng;

use super::state::{Continuation, Slot, Transitions};
use crate::corpus::{is_well_formed, Corpus};
use crate::errors::{GenError, Result};
use crate::text::{detokenize, tokenize, AugmentedToken, Tagger};

/// Default number of tokens in a state.
pub const DEFAULT_STATE_SIZE: usize = 2;

/// Parameters of a chain build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
	/// Number of tokens in a state (`k`), must be >= 1.
	pub state_size: usize,

	/// Skip lines containing quotes, parentheses or brackets.
	pub well_formed: bool,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self { state_size: DEFAULT_STATE_SIZE, well_formed: true }
	}
}

/// Result of a single walk over the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Walk {
	/// The end marker was drawn.
	Complete(Vec<AugmentedToken>),
	/// The step cap was reached before the end marker.
	Truncated,
	/// The walk reached a state with no outgoing transition.
	Stuck,
}

/// Markov chain over augmented tokens.
///
/// Maps every state (`k` consecutive slots) seen in the corpus to the
/// distribution of what followed it. Built once, read-only afterwards.
///
/// # Invariants
/// - `state_size` is always >= 1
/// - Every state reachable by a walk from the begin state has at least one
///   outgoing transition (possibly only `End`)
/// - No transition crosses two corpus lines
#[derive(Clone, Debug)]
pub struct TransitionModel {
	state_size: usize,
	states: HashMap<Vec<Slot>, Transitions>,

	/// Number of corpus lines that contributed transitions.
	lines: usize,

	/// Accepted lines rejoined, one per line, for originality checks.
	source_text: String,
}

impl TransitionModel {
	/// Builds the chain from every usable line of the corpus.
	///
	/// Blank and (when `well_formed` is set) malformed lines are skipped.
	///
	/// # Errors
	/// - [`GenError::InvalidStateSize`] if `state_size` is 0
	/// - [`GenError::EmptyCorpus`] if no line is usable
	/// - [`GenError::TaggerMismatch`] if the tagger misbehaves
	pub fn build<T: Tagger + ?Sized>(corpus: &Corpus, tagger: &T, options: &BuildOptions) -> Result<Self> {
		if options.state_size == 0 {
			return Err(GenError::InvalidStateSize(options.state_size));
		}

		let mut model = Self {
			state_size: options.state_size,
			states: HashMap::new(),
			lines: 0,
			source_text: String::new(),
		};

		let mut skipped = 0;
		for line in corpus.lines() {
			if line.trim().is_empty() || (options.well_formed && !is_well_formed(line)) {
				debug!("skipping corpus line {line:?}");
				skipped += 1;
				continue;
			}

			let tokens = tokenize(line, tagger)?;
			model.add_line(&tokens);
		}

		if model.lines == 0 {
			return Err(GenError::EmptyCorpus);
		}

		info!(
			"built chain of {} states from {} lines ({} skipped, state size {})",
			model.states.len(),
			model.lines,
			skipped,
			model.state_size
		);
		Ok(model)
	}

	/// Adds the transitions of one tagged line.
	///
	/// The line is padded with `state_size` begin markers and one end marker,
	/// then every window of `state_size` slots records what follows it.
	fn add_line(&mut self, tokens: &[AugmentedToken]) {
		if tokens.is_empty() {
			return;
		}

		let mut state = self.begin_state();
		for token in tokens {
			self.states
				.entry(state.clone())
				.or_default()
				.add_transition(Continuation::Token(token.clone()));
			state.remove(0);
			state.push(Slot::Token(token.clone()));
		}
		self.states.entry(state).or_default().add_transition(Continuation::End);

		if !self.source_text.is_empty() {
			self.source_text.push('\n');
		}
		self.source_text.push_str(&detokenize(tokens));
		self.lines += 1;
	}

	pub fn state_size(&self) -> usize {
		self.state_size
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of corpus lines used to build the model.
	pub fn lines(&self) -> usize {
		self.lines
	}

	/// The state every line starts from: `state_size` begin markers.
	///
	/// Its transitions count how often each token opened a line.
	pub fn begin_state(&self) -> Vec<Slot> {
		vec![Slot::Begin; self.state_size]
	}

	/// Outgoing transitions of `state`, if it was seen in the corpus.
	pub fn transitions(&self, state: &[Slot]) -> Option<&Transitions> {
		self.states.get(state)
	}

	pub fn states(&self) -> impl Iterator<Item = (&[Slot], &Transitions)> {
		self.states.iter().map(|(state, transitions)| (state.as_slice(), transitions))
	}

	pub(crate) fn source_text(&self) -> &str {
		&self.source_text
	}

	/// Walks the chain from `init` until the end marker is drawn.
	///
	/// Returns the generated tokens, excluding those already in `init`.
	/// At most `max_steps` tokens are generated; a longer walk is reported
	/// as [`Walk::Truncated`].
	pub fn walk<R: Rng + ?Sized>(&self, init: &[Slot], max_steps: usize, rng: &mut R) -> Walk {
		let mut state = init.to_vec();
		let mut tokens = Vec::new();

		loop {
			let next = match self.states.get(&state).and_then(|transitions| transitions.predict(rng)) {
				Some(next) => next,
				None => return Walk::Stuck,
			};

			match next {
				Continuation::End => return Walk::Complete(tokens),
				Continuation::Token(token) => {
					if tokens.len() == max_steps {
						return Walk::Truncated;
					}
					tokens.push(token.clone());
					state.remove(0);
					state.push(Slot::Token(token.clone()));
				}
			}
		}
	}
}
