//! Error and diagnostic types.
//!
//! Closure and conversion never fail: dangling references simply reach
//! nothing. Errors only come from importing a description, from editing one,
//! or from stepping a simulation past either end of its input.

use thiserror::Error;

use crate::model::{State, Symbol};

/// Reading or parsing an automaton description failed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The description could not be read.
    #[error("failed to read automaton description: {0}")]
    Io(#[from] std::io::Error),

    /// The description is not a well-shaped automaton record.
    #[error("malformed automaton description: {0}")]
    Json(#[from] serde_json::Error),
}

/// An edit was rejected; the original automaton is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A state with this label already exists.
    #[error("state {0} already exists")]
    DuplicateState(State),

    /// The edit names a state that is not part of the automaton.
    #[error("state {0} does not exist")]
    UnknownState(State),

    /// A symbol with this label is already in the alphabet.
    #[error("symbol {0} is already in the alphabet")]
    DuplicateSymbol(Symbol),

    /// The symbol is not in the alphabet.
    #[error("symbol {0} is not in the alphabet")]
    UnknownSymbol(Symbol),

    /// The epsilon symbol can't be taken out of the alphabet.
    #[error("the epsilon symbol cannot be removed from the alphabet")]
    EpsilonProtected,

    /// No transition lives at this index.
    #[error("transition index {index} is out of range for {len} transitions")]
    TransitionIndex {
        /// Requested index.
        index: usize,
        /// Number of transitions present.
        len: usize,
    },
}

/// A simulation step was requested that its precondition forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Every input symbol has already been consumed.
    #[error("all {len} input symbols have already been consumed")]
    InputExhausted {
        /// Length of the input.
        len: usize,
    },

    /// The run is already at step zero.
    #[error("the simulation is already at its first step")]
    AtStart,
}

/// A well-formedness problem found by [`Automaton::validate`](crate::Automaton::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    /// The same state label is listed twice.
    #[error("state {0} is listed more than once")]
    DuplicateState(State),

    /// The same symbol is listed twice in the alphabet.
    #[error("symbol {0} is listed more than once")]
    DuplicateSymbol(Symbol),

    /// The same state is marked final twice.
    #[error("final state {0} is listed more than once")]
    DuplicateFinal(State),

    /// A transition names a state that does not exist.
    #[error("transition #{index} references unknown state {state}")]
    DanglingTransition {
        /// Position of the transition.
        index: usize,
        /// The unknown endpoint.
        state: State,
    },

    /// The initial state does not exist.
    #[error("initial state {0} is not a known state")]
    DanglingInitial(State),

    /// A final state does not exist.
    #[error("final state {0} is not a known state")]
    DanglingFinal(State),

    /// States exist but none of them is initial.
    #[error("no initial state is set")]
    MissingInitial,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_edit_error_display() {
        let e = EditError::TransitionIndex { index: 7, len: 2 };
        assert_eq!(e.to_string(), "transition index 7 is out of range for 2 transitions");
        assert_eq!(EditError::UnknownState(State::from("q9")).to_string(), "state q9 does not exist");
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::DanglingTransition { index: 3, state: State::from("Z") };
        assert_eq!(issue.to_string(), "transition #3 references unknown state Z");
    }

    #[test]
    fn test_import_error_wraps_json() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        let e: ImportError = err.into();
        assert!(e.to_string().starts_with("malformed automaton description"));
    }
}
