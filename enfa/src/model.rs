//! The automaton description every engine consumes and produces.
//!
//! An [`Automaton`] is a plain value. Nothing in this crate mutates one in
//! place; conversion and the edit operations hand back a fresh value.

use std::borrow::Borrow;
use std::fmt::{self, Display};
use std::io::Read;

use hashbrown::HashSet;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::closure;
use crate::error::{ImportError, Issue};

/// Label of the reserved "no input consumed" symbol.
pub const EPSILON: &str = "ε";

// MARK: State

/// An opaque, case-sensitive state label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Creates a state with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label of this state.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self(label)
    }
}

// MARK: Symbol

/// An alphabet symbol. `ε` (and the empty label) stand for epsilon.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Label of the epsilon symbol, same as the crate-level [`EPSILON`].
    pub const EPSILON: &'static str = EPSILON;

    /// Creates a symbol with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The epsilon symbol.
    pub fn epsilon() -> Self {
        Self(EPSILON.to_owned())
    }

    /// Whether this symbol consumes no input.
    pub fn is_epsilon(&self) -> bool {
        self.0.is_empty() || self.0 == EPSILON
    }

    /// The label of this symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str(EPSILON)
        } else {
            f.write_str(&self.0)
        }
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for Symbol {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

// MARK: Transition

/// A single `(from, to, symbol)` edge. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Source state.
    pub from: State,
    /// Target state.
    pub to: State,
    /// Label of the edge.
    pub symbol: Symbol,
}

impl Transition {
    /// Creates a transition from `from` to `to` on `symbol`.
    pub fn new(from: impl Into<State>, to: impl Into<State>, symbol: impl Into<Symbol>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            symbol: symbol.into(),
        }
    }

    /// Creates an epsilon transition.
    pub fn epsilon(from: impl Into<State>, to: impl Into<State>) -> Self {
        Self::new(from, to, Symbol::epsilon())
    }

    /// Whether this edge is labelled with epsilon.
    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_epsilon()
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.symbol, self.to)
    }
}

// MARK: Automaton

/// A finite automaton that may contain epsilon transitions.
///
/// Serialises to the record shape `{states, alphabet, transitions,
/// initialState, finalStates}`. An empty `initialState` reads as unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automaton {
    states: Vec<State>,
    alphabet: Vec<Symbol>,
    transitions: Vec<Transition>,
    #[serde(deserialize_with = "empty_label_as_none")]
    initial_state: Option<State>,
    final_states: Vec<State>,
}

fn empty_label_as_none<'de, D>(deserializer: D) -> Result<Option<State>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.filter(|l| !l.is_empty()).map(State::from))
}

impl Automaton {
    /// Assembles an automaton from its parts. No validation happens here, see [`Automaton::validate`].
    pub fn new(
        states: Vec<State>,
        alphabet: Vec<Symbol>,
        transitions: Vec<Transition>,
        initial_state: Option<State>,
        final_states: Vec<State>,
    ) -> Self {
        Self {
            states,
            alphabet,
            transitions,
            initial_state,
            final_states,
        }
    }

    /// Shorthand for building an automaton out of string labels.
    /// Transitions are `(from, to, symbol)`.
    pub fn from_labels(
        states: &[&str],
        alphabet: &[&str],
        transitions: &[(&str, &str, &str)],
        initial_state: Option<&str>,
        final_states: &[&str],
    ) -> Self {
        Self::new(
            states.iter().copied().map(State::from).collect(),
            alphabet.iter().copied().map(Symbol::from).collect(),
            transitions
                .iter()
                .map(|&(from, to, symbol)| Transition::new(from, to, symbol))
                .collect(),
            initial_state.map(State::from),
            final_states.iter().copied().map(State::from).collect(),
        )
    }

    /// The three state example: `A` loops on `0`, `B` loops on `1`, `C` loops
    /// on `0`, with `A -ε-> B -ε-> C`, starting in `A` and accepting in `C`.
    pub fn sample() -> Self {
        Self::from_labels(
            &["A", "B", "C"],
            &["0", "1", EPSILON],
            &[
                ("A", "A", "0"),
                ("A", "B", EPSILON),
                ("B", "B", "1"),
                ("B", "C", EPSILON),
                ("C", "C", "0"),
            ],
            Some("A"),
            &["C"],
        )
    }

    /// A single non-accepting state `A` with nothing else.
    pub fn empty() -> Self {
        Self::from_labels(&["A"], &[EPSILON], &[], Some("A"), &[])
    }

    /// Parses a JSON description.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON description.
    pub fn from_reader(reader: impl Read) -> Result<Self, ImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Pretty printed JSON description.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// States, in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Alphabet, in insertion order.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Transitions, in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The initial state, if one is set.
    pub fn initial_state(&self) -> Option<&State> {
        self.initial_state.as_ref()
    }

    /// Accepting states.
    pub fn final_states(&self) -> &[State] {
        &self.final_states
    }

    /// Whether `state` is one of the declared states.
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s.as_str() == state)
    }

    /// Whether `state` is accepting.
    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.iter().any(|s| s.as_str() == state)
    }

    /// Whether any transition is labelled with epsilon.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().any(Transition::is_epsilon)
    }

    /// Every non-epsilon symbol that matters for acceptance: the declared
    /// alphabet first, then any symbol only ever seen on a transition.
    pub fn input_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = Vec::new();
        let declared = self.alphabet.iter();
        let used = self.transitions.iter().map(|t| &t.symbol);
        for symbol in declared.chain(used) {
            if !symbol.is_epsilon() && !symbols.contains(symbol) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }

    /// [`epsilon_closure`](crate::epsilon_closure) of `state` over this
    /// automaton's transitions.
    pub fn epsilon_closure(&self, state: &str) -> Vec<State> {
        closure::epsilon_closure(&State::from(state), &self.transitions)
    }

    /// Checks the description for duplicates and dangling references.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        let mut seen: HashSet<&State> = HashSet::new();
        for state in &self.states {
            if !seen.insert(state) {
                issues.push(Issue::DuplicateState(state.clone()));
            }
        }

        let mut seen_symbols: HashSet<&Symbol> = HashSet::new();
        for symbol in &self.alphabet {
            if !seen_symbols.insert(symbol) {
                issues.push(Issue::DuplicateSymbol(symbol.clone()));
            }
        }

        for (index, transition) in self.transitions.iter().enumerate() {
            let mut endpoints: SmallVec<[&State; 2]> = SmallVec::new();
            endpoints.push(&transition.from);
            if transition.to != transition.from {
                endpoints.push(&transition.to);
            }
            for state in endpoints {
                if !seen.contains(state) {
                    issues.push(Issue::DanglingTransition { index, state: state.clone() });
                }
            }
        }

        match &self.initial_state {
            Some(initial) if !seen.contains(initial) => {
                issues.push(Issue::DanglingInitial(initial.clone()));
            }
            None if !self.states.is_empty() => issues.push(Issue::MissingInitial),
            _ => {}
        }

        let mut seen_finals: HashSet<&State> = HashSet::new();
        for state in &self.final_states {
            if !seen.contains(state) {
                issues.push(Issue::DanglingFinal(state.clone()));
            }
            if !seen_finals.insert(state) {
                issues.push(Issue::DuplicateFinal(state.clone()));
            }
        }

        for issue in &issues {
            warn!(%issue, "automaton description is not well formed");
        }
        issues
    }
}
