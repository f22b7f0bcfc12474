//! The per-state, per-symbol transition map used for presentation.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::model::{Automaton, State, Symbol};

/// One row of a [`TransitionMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// The source state.
    pub state: State,
    /// Whether this is the initial state.
    pub initial: bool,
    /// Whether this state accepts.
    pub accepting: bool,
    /// Targets for each symbol of the map, in the map's symbol order.
    pub targets: Vec<Vec<State>>,
}

/// `δ(q, a)` tabulated for every declared state and every symbol in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionMap {
    symbols: Vec<Symbol>,
    rows: Vec<Row>,
}

impl TransitionMap {
    /// Tabulates `automaton`. Columns are the declared alphabet followed by
    /// any symbol only seen on a transition. Targets keep transition order
    /// with repeats dropped.
    pub fn of(automaton: &Automaton) -> Self {
        let mut symbols = automaton.alphabet().to_vec();
        for t in automaton.transitions() {
            if !symbols.contains(&t.symbol) {
                symbols.push(t.symbol.clone());
            }
        }
        let rows = automaton
            .states()
            .iter()
            .map(|state| Row {
                state: state.clone(),
                initial: automaton.initial_state() == Some(state),
                accepting: automaton.is_final(state.as_str()),
                targets: symbols
                    .iter()
                    .map(|symbol| {
                        let mut targets: Vec<State> = Vec::new();
                        for t in automaton.transitions() {
                            if &t.from == state && &t.symbol == symbol && !targets.contains(&t.to) {
                                targets.push(t.to.clone());
                            }
                        }
                        targets
                    })
                    .collect(),
            })
            .collect();

        Self { symbols, rows }
    }

    /// The column symbols.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// One row per state.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The cell for `state` on `symbol`, if both are part of the map.
    pub fn targets(&self, state: &str, symbol: &str) -> Option<&[State]> {
        let column = self.symbols.iter().position(|s| s.as_str() == symbol)?;
        let row = self.rows.iter().find(|r| r.state.as_str() == state)?;
        row.targets.get(column).map(Vec::as_slice)
    }
}

fn cell(targets: &[State]) -> String {
    if targets.is_empty() {
        return "Ø".to_owned();
    }
    let labels: Vec<&str> = targets.iter().map(State::as_str).collect();
    format!("{{{}}}", labels.join(", "))
}

impl Display for TransitionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec!["State".to_owned()];
        header.extend(self.symbols.iter().map(|a| format!("δ'(q, {a})")));
        header.push("Accepting?".to_owned());

        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                let marker = if row.initial { "-> " } else { "   " };
                let mut line = vec![format!("{marker}{}", row.state)];
                line.extend(row.targets.iter().map(|t| cell(t)));
                line.push(if row.accepting { "YES" } else { "no" }.to_owned());
                line
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for line in &body {
            for (width, text) in widths.iter_mut().zip(line) {
                *width = (*width).max(text.chars().count());
            }
        }

        for line in std::iter::once(&header).chain(&body) {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(text, &width)| {
                    let pad = width - text.chars().count();
                    format!("{text}{}", " ".repeat(pad))
                })
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())?;
        }
        Ok(())
    }
}
