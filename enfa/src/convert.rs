//! Epsilon elimination.
//!
//! States keep their identity: this is not subset construction, so the
//! result may still branch on a symbol. For every state `q` and input
//! symbol `a` the new relation is `δ'(q, a) = ε-closure(δ(ε-closure(q), a))`,
//! and `q` accepts when its closure touches an accepting state.

use hashbrown::HashSet;
use serde::Serialize;
use tracing::debug;

use crate::closure::{ClosureTable, closure_table, epsilon_closure};
use crate::model::{Automaton, State, Symbol, Transition};

/// Output of [`convert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// The epsilon-free automaton.
    pub converted: Automaton,
    /// Closure of every state of the input.
    pub closures: ClosureTable,
}

/// Rewrites `automaton` into an equivalent automaton with no epsilon
/// transitions. The input is left untouched.
///
/// Edges are emitted once per `(q, u, a)`, grouped by source state then by
/// symbol. A target outside the declared states contributes its own closure.
pub fn convert(automaton: &Automaton) -> Conversion {
    let closures = closure_table(automaton);
    let symbols = automaton.input_symbols();

    let final_states: Vec<State> = automaton
        .states()
        .iter()
        .filter(|q| {
            closures
                .get(*q)
                .is_some_and(|closure| closure.iter().any(|s| automaton.is_final(s.as_str())))
        })
        .cloned()
        .collect();

    // Targets outside the declared states still close over their own edges.
    let dangling: ClosureTable = automaton
        .transitions()
        .iter()
        .filter(|t| !closures.contains_key(&t.to))
        .map(|t| (t.to.clone(), epsilon_closure(&t.to, automaton.transitions())))
        .collect();

    let mut transitions: Vec<Transition> = Vec::new();
    {
        let mut emitted: HashSet<(&State, &State, &Symbol)> = HashSet::new();
        for (q, q_closure) in &closures {
            for symbol in &symbols {
                let direct = automaton
                    .transitions()
                    .iter()
                    .filter(|t| &t.symbol == symbol && q_closure.contains(&t.from));
                for edge in direct {
                    let targets = closures.get(&edge.to).or_else(|| dangling.get(&edge.to));
                    for u in targets.into_iter().flatten() {
                        if emitted.insert((q, u, symbol)) {
                            transitions.push(Transition {
                                from: q.clone(),
                                to: u.clone(),
                                symbol: symbol.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    let alphabet: Vec<Symbol> = automaton
        .alphabet()
        .iter()
        .filter(|a| !a.is_epsilon())
        .cloned()
        .collect();

    debug!(
        states = automaton.states().len(),
        before = automaton.transitions().len(),
        after = transitions.len(),
        finals = final_states.len(),
        "eliminated epsilon transitions"
    );

    let converted = Automaton::new(
        automaton.states().to_vec(),
        alphabet,
        transitions,
        automaton.initial_state().cloned(),
        final_states,
    );

    Conversion { converted, closures }
}
