//! Term dictionary expansion with prefix and Levenshtein automata.

use std::{collections::BTreeSet, str};

use levenshtein_automata::{DFA, Distance, SINK_STATE};
use tantivy::{Searcher, schema::Field};
use tantivy_fst::Automaton;

use crate::IndexError;

/// Wrapper that implements `tantivy_fst::Automaton` for `levenshtein_automata::DFA`.
pub(super) struct LevenshteinDfa(pub(super) DFA);

impl Automaton for LevenshteinDfa {
    type State = u32;

    fn start(&self) -> Self::State {
        self.0.initial_state()
    }

    fn is_match(&self, state: &Self::State) -> bool {
        matches!(self.0.distance(*state), Distance::Exact(_))
    }

    fn can_match(&self, state: &Self::State) -> bool {
        *state != SINK_STATE
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        self.0.transition(*state, byte)
    }
}

/// Matches every term starting with a fixed prefix.
///
/// The state is the number of prefix bytes matched so far, or `None` once a byte diverged.
pub(super) struct PrefixAutomaton {
    /// Prefix bytes.
    prefix: Vec<u8>,
}

impl PrefixAutomaton {
    /// Creates an automaton matching terms that start with `prefix`.
    pub(super) fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.as_bytes().to_vec(),
        }
    }
}

impl Automaton for PrefixAutomaton {
    type State = Option<usize>;

    fn start(&self) -> Self::State {
        Some(0)
    }

    fn is_match(&self, state: &Self::State) -> bool {
        *state == Some(self.prefix.len())
    }

    fn can_match(&self, state: &Self::State) -> bool {
        state.is_some()
    }

    fn will_always_match(&self, state: &Self::State) -> bool {
        self.is_match(state)
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        match *state {
            Some(matched) if matched == self.prefix.len() => Some(matched),
            Some(matched) if self.prefix[matched] == byte => Some(matched + 1),
            _ => None,
        }
    }
}

/// Collects every indexed term of `field` accepted by the automaton `make` builds.
///
/// One automaton is built per segment.
pub(super) fn expand_terms<A, F>(
    searcher: &Searcher,
    field: Field,
    make: F,
) -> Result<BTreeSet<String>, IndexError>
where
    A: Automaton,
    A::State: Clone,
    F: Fn() -> A,
{
    let mut terms = BTreeSet::new();

    for segment_reader in searcher.segment_readers() {
        let inverted_index = segment_reader
            .inverted_index(field)
            .map_err(|e| IndexError::search(&e))?;
        let mut stream = inverted_index.terms().search(make()).into_stream()?;

        while stream.advance() {
            if let Ok(term) = str::from_utf8(stream.key()) {
                terms.insert(term.to_string());
            }
        }
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use levenshtein_automata::LevenshteinAutomatonBuilder;

    use super::*;

    fn run<A: Automaton>(automaton: &A, input: &str) -> bool {
        let mut state = automaton.start();
        for &byte in input.as_bytes() {
            if !automaton.can_match(&state) {
                return false;
            }
            state = automaton.accept(&state, byte);
        }
        automaton.is_match(&state)
    }

    #[test]
    fn prefix_matches_extensions() {
        let automaton = PrefixAutomaton::new("hard");
        assert!(run(&automaton, "hard"));
        assert!(run(&automaton, "hardwar"));
        assert!(!run(&automaton, "har"));
        assert!(!run(&automaton, "shard"));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        let automaton = PrefixAutomaton::new("");
        assert!(run(&automaton, ""));
        assert!(run(&automaton, "anything"));
    }

    #[test]
    fn levenshtein_counts_transpositions_once() {
        let builder = LevenshteinAutomatonBuilder::new(1, true);
        let automaton = LevenshteinDfa(builder.build_dfa("board"));
        assert!(run(&automaton, "baord"));
        assert!(run(&automaton, "boad"));
        assert!(!run(&automaton, "bread"));
    }
}
