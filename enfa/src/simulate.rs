//! Step-by-step acceptance simulation with exact backward replay.
//!
//! A [`Simulation`] tracks the set of active states while an input string is
//! consumed one character at a time. Every step's active set is recorded, so
//! stepping back restores exactly what stepping forward produced.

use hashbrown::HashSet;
use tracing::debug;

use crate::error::SimulationError;
use crate::model::{Automaton, State, Symbol};

/// A single run of an automaton over an input string.
///
/// Invariant: `history.len() == step + 1` and the active states are
/// `history[step]`.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    automaton: &'a Automaton,
    input: Vec<Symbol>,
    step: usize,
    history: Vec<Vec<State>>,
}

impl<'a> Simulation<'a> {
    /// Starts a run of `automaton` over `input`, positioned before the first character.
    pub fn new(automaton: &'a Automaton, input: &str) -> Self {
        let mut simulation = Self {
            automaton,
            input: Vec::new(),
            step: 0,
            history: Vec::new(),
        };
        simulation.reset(automaton, input);
        simulation
    }

    /// Discards the current run and starts over, possibly on a different
    /// automaton or input. The initial active set is the epsilon-closure of
    /// the initial state (empty when there is none).
    pub fn reset(&mut self, automaton: &'a Automaton, input: &str) {
        let start = automaton
            .initial_state()
            .map(|initial| automaton.epsilon_closure(initial.as_str()))
            .unwrap_or_default();

        debug!(input, active = ?start, "reset simulation");

        self.automaton = automaton;
        self.input = input.chars().map(Symbol::from).collect();
        self.step = 0;
        self.history = vec![start];
    }

    /// Consumes the next input character.
    ///
    /// The new active set is the epsilon-closure of every state reachable from
    /// the current set on that character, sorted by label. An empty result is a
    /// dead run, not an error; stepping further keeps it empty.
    pub fn step_forward(&mut self) -> Result<&[State], SimulationError> {
        let Some(symbol) = self.input.get(self.step) else {
            return Err(SimulationError::InputExhausted { len: self.input.len() });
        };

        let mut next: Vec<State> = Vec::new();
        {
            let current: HashSet<&State> = self.active_states().iter().collect();
            let mut seen: HashSet<State> = HashSet::new();

            let direct = self
                .automaton
                .transitions()
                .iter()
                .filter(|t| !t.is_epsilon() && &t.symbol == symbol && current.contains(&t.from));
            for transition in direct {
                for state in self.automaton.epsilon_closure(transition.to.as_str()) {
                    if !seen.contains(&state) {
                        seen.insert(state.clone());
                        next.push(state);
                    }
                }
            }
        }
        next.sort();

        debug!(step = self.step, %symbol, active = ?next, "stepped forward");

        self.history.push(next);
        self.step += 1;
        Ok(self.active_states())
    }

    /// Undoes the last [`step_forward`](Self::step_forward) by replaying history.
    pub fn step_backward(&mut self) -> Result<&[State], SimulationError> {
        if self.step == 0 {
            return Err(SimulationError::AtStart);
        }

        self.history.pop();
        self.step -= 1;

        debug!(step = self.step, active = ?self.active_states(), "stepped backward");
        Ok(self.active_states())
    }

    /// Steps forward until the input is exhausted and reports acceptance.
    pub fn run_to_end(&mut self) -> bool {
        while !self.is_finished() {
            if self.step_forward().is_err() {
                break;
            }
        }
        self.is_accepted()
    }

    /// The automaton being simulated.
    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    /// The input, one symbol per character.
    pub fn input(&self) -> &[Symbol] {
        &self.input
    }

    /// Number of characters consumed so far.
    pub fn step_index(&self) -> usize {
        self.step
    }

    /// The symbol the next forward step would consume.
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.input.get(self.step)
    }

    /// Currently active states.
    pub fn active_states(&self) -> &[State] {
        self.history.get(self.step).map_or(&[][..], Vec::as_slice)
    }

    /// Active states at every step from zero to the current one.
    pub fn history(&self) -> &[Vec<State>] {
        &self.history
    }

    /// No states are active, so the input can only be rejected.
    pub fn is_dead(&self) -> bool {
        self.active_states().is_empty()
    }

    /// The whole input has been consumed.
    pub fn is_finished(&self) -> bool {
        self.step == self.input.len()
    }

    /// Finished, with at least one accepting state active.
    pub fn is_accepted(&self) -> bool {
        self.is_finished()
            && self
                .active_states()
                .iter()
                .any(|s| self.automaton.is_final(s.as_str()))
    }
}

/// Whether `automaton` accepts `input`.
pub fn accepts(automaton: &Automaton, input: &str) -> bool {
    Simulation::new(automaton, input).run_to_end()
}

//MARK: Tests
#[cfg(test)]
mod test {
    use super::*;

    fn labels(states: &[State]) -> Vec<&str> {
        states.iter().map(State::as_str).collect()
    }

    #[test]
    fn test_sample_accepts_zero() {
        let sample = Automaton::sample();
        let mut sim = Simulation::new(&sample, "0");
        assert_eq!(labels(sim.active_states()), vec!["A", "B", "C"]);
        assert!(!sim.is_finished());
        assert!(!sim.is_accepted());

        let active = sim.step_forward().unwrap();
        assert_eq!(labels(active), vec!["A", "B", "C"]);
        assert!(sim.is_finished());
        assert!(sim.is_accepted());
    }

    #[test]
    fn test_sample_strings() {
        let sample = Automaton::sample();
        assert!(accepts(&sample, ""));
        assert!(accepts(&sample, "0011"));
        assert!(accepts(&sample, "0110"));
        assert!(accepts(&sample, "010"));
        assert!(!accepts(&sample, "101"));
        assert!(!accepts(&sample, "2"));
    }

    #[test]
    fn test_forward_is_sorted() {
        let automaton = Automaton::from_labels(
            &["S", "b", "a", "C"],
            &["x", "ε"],
            &[("S", "b", "x"), ("S", "a", "x"), ("a", "C", "ε")],
            Some("S"),
            &["C"],
        );
        let mut sim = Simulation::new(&automaton, "x");
        assert_eq!(labels(sim.step_forward().unwrap()), vec!["C", "a", "b"]);
        assert!(sim.is_accepted());
    }

    #[test]
    fn test_start_matches_free_closure_with_dangling_target() {
        let automaton = Automaton::from_labels(
            &["A", "B"],
            &["a", "ε"],
            &[("A", "Y", "ε"), ("A", "B", "a")],
            Some("A"),
            &["Y"],
        );
        let sim = Simulation::new(&automaton, "");
        let expected = crate::closure::epsilon_closure(&State::from("A"), automaton.transitions());
        assert_eq!(sim.active_states(), expected.as_slice());
        assert!(sim.is_accepted());
        assert!(!accepts(&automaton, "a"));
    }

    #[test]
    fn test_backward_replays_history() {
        let sample = Automaton::sample();
        let mut sim = Simulation::new(&sample, "0101");

        let mut forward = vec![sim.active_states().to_vec()];
        while !sim.is_finished() {
            forward.push(sim.step_forward().unwrap().to_vec());
        }
        assert_eq!(sim.history(), forward.as_slice());

        for k in (0..4).rev() {
            let active = sim.step_backward().unwrap().to_vec();
            assert_eq!(active, forward[k]);
            assert_eq!(sim.step_index(), k);
            assert_eq!(sim.history().len(), k + 1);
        }
        assert_eq!(sim.step_backward(), Err(SimulationError::AtStart));
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn test_step_past_end_is_rejected() {
        let sample = Automaton::sample();
        let mut sim = Simulation::new(&sample, "1");
        sim.step_forward().unwrap();
        let before = sim.history().to_vec();
        assert_eq!(sim.step_forward(), Err(SimulationError::InputExhausted { len: 1 }));
        assert_eq!(sim.history(), before.as_slice());
        assert_eq!(sim.step_index(), 1);
    }

    #[test]
    fn test_single_state_rejects_everything() {
        let empty = Automaton::empty();
        for input in ["a", "0", "01", "ε"] {
            let mut sim = Simulation::new(&empty, input);
            assert!(!sim.run_to_end());
            assert!(sim.is_dead());
            assert!(sim.active_states().is_empty());
        }
    }

    #[test]
    fn test_dead_run_stays_dead() {
        let sample = Automaton::sample();
        let mut sim = Simulation::new(&sample, "1x00");
        sim.step_forward().unwrap();
        assert!(!sim.is_dead());
        sim.step_forward().unwrap();
        assert!(sim.is_dead());
        sim.step_forward().unwrap();
        sim.step_forward().unwrap();
        assert!(sim.is_dead());
        assert!(sim.is_finished());
        assert!(!sim.is_accepted());
    }

    #[test]
    fn test_epsilon_character_is_not_consumed_by_epsilon_edges() {
        let automaton = Automaton::from_labels(&["A", "B"], &["ε"], &[("A", "B", "ε")], Some("A"), &["B"]);
        assert!(accepts(&automaton, ""));
        assert!(!accepts(&automaton, "ε"));
    }

    #[test]
    fn test_no_initial_state() {
        let automaton = Automaton::from_labels(&[], &["ε"], &[], None, &[]);
        let sim = Simulation::new(&automaton, "");
        assert!(sim.is_dead());
        assert!(sim.is_finished());
        assert!(!sim.is_accepted());
    }

    #[test]
    fn test_reset_switches_automaton() {
        let sample = Automaton::sample();
        let empty = Automaton::empty();
        let mut sim = Simulation::new(&sample, "00");
        sim.step_forward().unwrap();
        sim.reset(&empty, "");
        assert_eq!(sim.step_index(), 0);
        assert_eq!(labels(sim.active_states()), vec!["A"]);
        assert_eq!(sim.history().len(), 1);
        assert!(sim.is_finished());
        assert!(!sim.is_accepted());
        assert_eq!(sim.next_symbol(), None);
    }
}
