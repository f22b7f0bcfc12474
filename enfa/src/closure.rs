//! Epsilon-closure over a flat transition list.

use hashbrown::HashSet;
use indexmap::IndexMap;
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::model::{Automaton, State, Transition};

/// For every state, the states it reaches on epsilon moves alone (itself first).
pub type ClosureTable = IndexMap<State, Vec<State>>;

/// Breadth-first walk along epsilon edges starting at `seed`.
/// Each state is queued at most once so epsilon cycles terminate.
fn reach<'a>(seed: &'a State, transitions: &'a [Transition]) -> SmallVec<[&'a State; 8]> {
    let mut reached: SmallVec<[&'a State; 8]> = smallvec![seed];
    let mut seen: HashSet<&'a State> = HashSet::new();
    seen.insert(seed);

    let mut i = 0;
    while i < reached.len() {
        let current = reached[i];
        for transition in transitions.iter().filter(|t| t.is_epsilon() && &t.from == current) {
            if seen.insert(&transition.to) {
                reached.push(&transition.to);
            }
        }
        i += 1;
    }

    reached
}

/// The epsilon-closure of `state`: `state` itself followed by everything it
/// reaches through epsilon transitions, in breadth-first order.
///
/// Every closure in the crate goes through here. Declared or not, a state
/// closes over exactly the epsilon edges that leave it, so a dangling
/// reference adds itself and nothing more.
pub fn epsilon_closure(state: &State, transitions: &[Transition]) -> Vec<State> {
    let closure: Vec<State> = reach(state, transitions).into_iter().cloned().collect();
    trace!(%state, ?closure, "computed epsilon closure");
    closure
}

/// Builds the closure table of `automaton`, one entry per declared state.
pub fn closure_table(automaton: &Automaton) -> ClosureTable {
    automaton
        .states()
        .iter()
        .map(|state| (state.clone(), epsilon_closure(state, automaton.transitions())))
        .collect()
}
