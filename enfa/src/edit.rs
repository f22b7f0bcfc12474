//! Edits that produce a new automaton and leave the receiver untouched.
//!
//! These keep the description well formed: removing a state drops every
//! reference to it, removing a symbol drops its transitions, and the epsilon
//! symbol can never be removed.

use crate::error::EditError;
use crate::model::{Automaton, State, Symbol, Transition};

impl Automaton {
    /// Adds a state at the end of the state list.
    pub fn with_state(&self, state: impl Into<State>) -> Result<Self, EditError> {
        let state = state.into();
        if self.has_state(state.as_str()) {
            return Err(EditError::DuplicateState(state));
        }
        let mut states = self.states().to_vec();
        states.push(state);
        Ok(Self::new(
            states,
            self.alphabet().to_vec(),
            self.transitions().to_vec(),
            self.initial_state().cloned(),
            self.final_states().to_vec(),
        ))
    }

    /// Removes a state together with its transitions and final marking.
    /// If it was initial, the first remaining state becomes initial.
    pub fn without_state(&self, state: &str) -> Result<Self, EditError> {
        if !self.has_state(state) {
            return Err(EditError::UnknownState(State::from(state)));
        }
        let states: Vec<State> = self.states().iter().filter(|s| s.as_str() != state).cloned().collect();
        let transitions = self
            .transitions()
            .iter()
            .filter(|t| t.from.as_str() != state && t.to.as_str() != state)
            .cloned()
            .collect();
        let final_states = self.final_states().iter().filter(|s| s.as_str() != state).cloned().collect();
        let initial_state = match self.initial_state() {
            Some(initial) if initial.as_str() == state => states.first().cloned(),
            other => other.cloned(),
        };
        Ok(Self::new(states, self.alphabet().to_vec(), transitions, initial_state, final_states))
    }

    /// Adds a symbol at the end of the alphabet.
    pub fn with_symbol(&self, symbol: impl Into<Symbol>) -> Result<Self, EditError> {
        let symbol = symbol.into();
        if self.alphabet().contains(&symbol) {
            return Err(EditError::DuplicateSymbol(symbol));
        }
        let mut alphabet = self.alphabet().to_vec();
        alphabet.push(symbol);
        Ok(Self::new(
            self.states().to_vec(),
            alphabet,
            self.transitions().to_vec(),
            self.initial_state().cloned(),
            self.final_states().to_vec(),
        ))
    }

    /// Removes a symbol and every transition labelled with it.
    pub fn without_symbol(&self, symbol: &str) -> Result<Self, EditError> {
        let symbol = Symbol::from(symbol);
        if symbol.is_epsilon() {
            return Err(EditError::EpsilonProtected);
        }
        if !self.alphabet().contains(&symbol) {
            return Err(EditError::UnknownSymbol(symbol));
        }
        let alphabet = self.alphabet().iter().filter(|a| **a != symbol).cloned().collect();
        let transitions = self.transitions().iter().filter(|t| t.symbol != symbol).cloned().collect();
        Ok(Self::new(
            self.states().to_vec(),
            alphabet,
            transitions,
            self.initial_state().cloned(),
            self.final_states().to_vec(),
        ))
    }

    /// Appends a transition. Both endpoints must exist; duplicates are fine.
    pub fn with_transition(&self, transition: Transition) -> Result<Self, EditError> {
        for endpoint in [&transition.from, &transition.to] {
            if !self.has_state(endpoint.as_str()) {
                return Err(EditError::UnknownState(endpoint.clone()));
            }
        }
        let mut transitions = self.transitions().to_vec();
        transitions.push(transition);
        Ok(Self::new(
            self.states().to_vec(),
            self.alphabet().to_vec(),
            transitions,
            self.initial_state().cloned(),
            self.final_states().to_vec(),
        ))
    }

    /// Removes the transition at `index`.
    pub fn without_transition(&self, index: usize) -> Result<Self, EditError> {
        let len = self.transitions().len();
        if index >= len {
            return Err(EditError::TransitionIndex { index, len });
        }
        let mut transitions = self.transitions().to_vec();
        transitions.remove(index);
        Ok(Self::new(
            self.states().to_vec(),
            self.alphabet().to_vec(),
            transitions,
            self.initial_state().cloned(),
            self.final_states().to_vec(),
        ))
    }

    /// Flips whether `state` accepts.
    pub fn toggle_final(&self, state: &str) -> Result<Self, EditError> {
        if !self.has_state(state) {
            return Err(EditError::UnknownState(State::from(state)));
        }
        let mut final_states: Vec<State> = self.final_states().iter().filter(|s| s.as_str() != state).cloned().collect();
        if !self.is_final(state) {
            final_states.push(State::from(state));
        }
        Ok(Self::new(
            self.states().to_vec(),
            self.alphabet().to_vec(),
            self.transitions().to_vec(),
            self.initial_state().cloned(),
            final_states,
        ))
    }

    /// Makes `state` the initial state.
    pub fn with_initial(&self, state: &str) -> Result<Self, EditError> {
        if !self.has_state(state) {
            return Err(EditError::UnknownState(State::from(state)));
        }
        Ok(Self::new(
            self.states().to_vec(),
            self.alphabet().to_vec(),
            self.transitions().to_vec(),
            Some(State::from(state)),
            self.final_states().to_vec(),
        ))
    }
}

//MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use crate::simulate::accepts;

    #[test]
    fn test_add_and_remove_state() {
        let sample = Automaton::sample();
        let grown = sample.with_state("D").unwrap();
        assert_eq!(grown.states().len(), 4);
        assert_eq!(sample.states().len(), 3);
        assert_eq!(sample.with_state("A"), Err(EditError::DuplicateState(State::from("A"))));

        let shrunk = sample.without_state("B").unwrap();
        assert_eq!(shrunk.states(), &[State::from("A"), State::from("C")]);
        assert!(shrunk.transitions().iter().all(|t| t.from.as_str() != "B" && t.to.as_str() != "B"));
        assert_eq!(shrunk.transitions().len(), 2);
        assert!(shrunk.validate().is_empty());
        assert!(!accepts(&shrunk, ""));
    }

    #[test]
    fn test_removing_initial_moves_it() {
        let sample = Automaton::sample();
        let shrunk = sample.without_state("A").unwrap();
        assert_eq!(shrunk.initial_state(), Some(&State::from("B")));

        let gone = Automaton::empty().without_state("A").unwrap();
        assert_eq!(gone.initial_state(), None);
        assert!(gone.states().is_empty());
        assert!(gone.validate().is_empty());
    }

    #[test]
    fn test_removing_final_state_unmarks_it() {
        let shrunk = Automaton::sample().without_state("C").unwrap();
        assert!(shrunk.final_states().is_empty());
    }

    #[test]
    fn test_symbols() {
        let sample = Automaton::sample();
        assert_eq!(sample.without_symbol("ε"), Err(EditError::EpsilonProtected));
        assert_eq!(sample.without_symbol(""), Err(EditError::EpsilonProtected));
        assert_eq!(sample.with_symbol("0"), Err(EditError::DuplicateSymbol(Symbol::from("0"))));
        assert_eq!(sample.without_symbol("7"), Err(EditError::UnknownSymbol(Symbol::from("7"))));

        let no_ones = sample.without_symbol("1").unwrap();
        assert_eq!(no_ones.alphabet(), &[Symbol::from("0"), Symbol::epsilon()]);
        assert!(no_ones.transitions().iter().all(|t| t.symbol.as_str() != "1"));
        assert!(!accepts(&no_ones, "1"));

        let wider = sample.with_symbol("2").unwrap();
        assert_eq!(wider.alphabet().len(), 4);
    }

    #[test]
    fn test_transitions() {
        let sample = Automaton::sample();
        let more = sample.with_transition(Transition::new("C", "A", "1")).unwrap();
        assert_eq!(more.transitions().len(), 6);
        assert!(accepts(&more, "01010"));
        assert_eq!(
            sample.with_transition(Transition::new("C", "Q", "1")),
            Err(EditError::UnknownState(State::from("Q")))
        );

        let fewer = sample.without_transition(1).unwrap();
        assert_eq!(fewer.transitions().len(), 4);
        assert_eq!(fewer.transitions()[1], Transition::new("B", "B", "1"));
        assert_eq!(
            sample.without_transition(5),
            Err(EditError::TransitionIndex { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_final_and_initial() {
        let sample = Automaton::sample();
        let both = sample.toggle_final("A").unwrap();
        assert_eq!(both.final_states(), &[State::from("C"), State::from("A")]);
        let back = both.toggle_final("A").unwrap();
        assert_eq!(back.final_states(), sample.final_states());

        let from_c = sample.with_initial("C").unwrap();
        assert!(!accepts(&from_c, "1"));
        assert!(accepts(&from_c, "00"));
        assert_eq!(sample.with_initial("Z"), Err(EditError::UnknownState(State::from("Z"))));
        assert_eq!(sample.toggle_final("Z"), Err(EditError::UnknownState(State::from("Z"))));
    }
}
