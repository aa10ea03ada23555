use std::collections::BTreeMap;

use rand::Rng;

use crate::text::AugmentedToken;

/// One position of a chain state.
///
/// `Begin` pads the start of every line so that the first words of a line
/// have a state of full length.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
	Begin,
	Token(AugmentedToken),
}

impl Slot {
	/// The token held by this slot, `None` for the begin marker.
	pub fn token(&self) -> Option<&AugmentedToken> {
		match self {
			Slot::Begin => None,
			Slot::Token(token) => Some(token),
		}
	}
}

/// What may follow a state: another token, or the end of the line.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Continuation {
	Token(AugmentedToken),
	End,
}

/// Outgoing transitions of a single chain state.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Iteration order is stable, so sampling with a seeded RNG is reproducible
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
	/// Example: { cat/NN => 3, End => 1 }
	transitions: BTreeMap<Continuation, usize>,
}

impl Transitions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add_transition(&mut self, next: Continuation) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}

	/// Total number of observations leaving this state.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Number of distinct continuations.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Occurrence count of `next`, 0 if never observed.
	pub fn count(&self, next: &Continuation) -> usize {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Continuation, usize)> {
		self.transitions.iter().map(|(next, occurrence)| (next, *occurrence))
	}

	/// Picks the next continuation using weighted random sampling.
	///
	/// The probability of selecting a continuation is proportional to its
	/// occurrence count, taken as is (no smoothing).
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Continuation> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next);
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`.
		self.transitions.keys().next_back()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn token(word: &str) -> Continuation {
		Continuation::Token(AugmentedToken::new(word, "NN"))
	}

	#[test]
	fn counts_accumulate() {
		let mut transitions = Transitions::new();
		transitions.add_transition(token("cat"));
		transitions.add_transition(token("cat"));
		transitions.add_transition(Continuation::End);

		assert_eq!(transitions.len(), 2);
		assert_eq!(transitions.total(), 3);
		assert_eq!(transitions.count(&token("cat")), 2);
		assert_eq!(transitions.count(&token("dog")), 0);
	}

	#[test]
	fn empty_state_predicts_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert!(Transitions::new().predict(&mut rng).is_none());
	}

	#[test]
	fn single_continuation_is_deterministic() {
		let mut transitions = Transitions::new();
		transitions.add_transition(token("mat"));

		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..20 {
			assert_eq!(transitions.predict(&mut rng), Some(&token("mat")));
		}
	}

	#[test]
	fn sampling_follows_counts() {
		let mut transitions = Transitions::new();
		for _ in 0..9 {
			transitions.add_transition(token("often"));
		}
		transitions.add_transition(token("rarely"));

		let mut rng = StdRng::seed_from_u64(7);
		let often = (0..2000)
			.filter(|_| transitions.predict(&mut rng) == Some(&token("often")))
			.count();
		assert!((1600..=1990).contains(&often), "often drawn {often} times");
	}
}
