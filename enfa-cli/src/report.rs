//! Renders library results for the terminal, as text or JSON.
use enfa::{Automaton, ClosureTable, Conversion, Issue, Simulation, State, Symbol, TransitionMap};
use serde::Serialize;

use crate::config::{EnfaConfig, OutputFormat};

/// Something to print, and whether the command succeeded.
#[derive(Debug)]
pub struct Report {
    pub body: String,
    pub ok: bool,
}

impl Report {
    fn ok(body: String) -> Self {
        Self { body, ok: true }
    }
}

fn set(states: &[State]) -> String {
    let labels: Vec<&str> = states.iter().map(State::as_str).collect();
    format!("{{{}}}", labels.join(", "))
}

/// Copy of `automaton` with its transitions ordered by (from, symbol, to).
pub fn sorted(automaton: &Automaton) -> Automaton {
    let mut transitions = automaton.transitions().to_vec();
    transitions.sort_by(|a, b| (&a.from, &a.symbol, &a.to).cmp(&(&b.from, &b.symbol, &b.to)));
    Automaton::new(
        automaton.states().to_vec(),
        automaton.alphabet().to_vec(),
        transitions,
        automaton.initial_state().cloned(),
        automaton.final_states().to_vec(),
    )
}

pub fn closure_table(closures: &ClosureTable) -> String {
    let width = closures.keys().map(|s| s.as_str().chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (state, closure) in closures {
        let pad = width - state.as_str().chars().count();
        out.push_str(&format!("ε-closure({state}){}  = {}\n", " ".repeat(pad), set(closure)));
    }
    out
}

pub fn conversion(conversion: &Conversion, config: &EnfaConfig) -> serde_json::Result<Report> {
    let converted = if config.sort_transitions {
        sorted(&conversion.converted)
    } else {
        conversion.converted.clone()
    };

    let body = match config.format {
        OutputFormat::Json => {
            let shown = Conversion {
                converted,
                closures: conversion.closures.clone(),
            };
            serde_json::to_string_pretty(&shown)? + "\n"
        }
        OutputFormat::Text => {
            let mut out = String::from("ε-closures\n");
            out.push_str(&closure_table(&conversion.closures));
            out.push_str("\nconverted transition map\n");
            out.push_str(&TransitionMap::of(&converted).to_string());
            out.push_str("\ntransitions\n");
            for transition in converted.transitions() {
                out.push_str(&format!("  {transition}\n"));
            }
            out
        }
    };
    Ok(Report::ok(body))
}

pub fn closure(state: &State, closure: &[State], format: OutputFormat) -> serde_json::Result<Report> {
    let body = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({ "state": state, "closure": closure }))? + "\n"
        }
        OutputFormat::Text => format!("ε-closure({state}) = {}\n", set(closure)),
    };
    Ok(Report::ok(body))
}

#[derive(Debug, Serialize)]
struct TraceStep {
    step: usize,
    symbol: Option<Symbol>,
    active: Vec<State>,
}

#[derive(Debug, Serialize)]
struct Trace {
    input: String,
    steps: Vec<TraceStep>,
    accepted: bool,
}

/// Runs `input` to the end, recording every step.
pub fn simulation(automaton: &Automaton, input: &str, format: OutputFormat) -> serde_json::Result<Report> {
    let mut sim = Simulation::new(automaton, input);
    let mut steps = vec![TraceStep {
        step: 0,
        symbol: None,
        active: sim.active_states().to_vec(),
    }];
    while let Some(symbol) = sim.next_symbol().cloned() {
        let Ok(active) = sim.step_forward() else {
            break;
        };
        let active = active.to_vec();
        steps.push(TraceStep {
            step: sim.step_index(),
            symbol: Some(symbol),
            active,
        });
    }
    let trace = Trace {
        input: input.to_owned(),
        steps,
        accepted: sim.is_accepted(),
    };

    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&trace)? + "\n",
        OutputFormat::Text => {
            let mut out = format!("input: {:?}\n", trace.input);
            for step in &trace.steps {
                let consumed = step.symbol.as_ref().map(|s| format!("'{s}'")).unwrap_or_default();
                let active = if step.active.is_empty() {
                    "dead".to_owned()
                } else {
                    set(&step.active)
                };
                out.push_str(&format!("step {:<3} {:<4} {}\n", step.step, consumed, active));
            }
            out.push_str(if trace.accepted { "ACCEPTED\n" } else { "REJECTED\n" });
            out
        }
    };
    Ok(Report::ok(body))
}

pub fn issues(issues: &[Issue], format: OutputFormat) -> serde_json::Result<Report> {
    let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
    let body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&messages)? + "\n",
        OutputFormat::Text if messages.is_empty() => "ok\n".to_owned(),
        OutputFormat::Text => messages.iter().map(|m| format!("{m}\n")).collect(),
    };
    Ok(Report {
        body,
        ok: issues.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use enfa::convert;

    #[test]
    fn test_text_trace() {
        let sample = Automaton::sample();
        let report = simulation(&sample, "01x", OutputFormat::Text).unwrap();
        let lines: Vec<&str> = report.body.lines().collect();
        assert_eq!(lines[0], "input: \"01x\"");
        assert!(lines[1].ends_with("{A, B, C}"));
        assert!(lines[2].contains("'0'"));
        assert!(lines[3].ends_with("{B, C}"));
        assert!(lines[4].ends_with("dead"));
        assert_eq!(lines[5], "REJECTED");
        assert!(report.ok);
    }

    #[test]
    fn test_json_trace() {
        let sample = Automaton::sample();
        let report = simulation(&sample, "0", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.body).unwrap();
        assert_eq!(value["accepted"], true);
        assert_eq!(value["steps"][1]["symbol"], "0");
        assert_eq!(value["steps"][0]["symbol"], serde_json::Value::Null);
    }

    #[test]
    fn test_conversion_json_shape() {
        let result = convert(&Automaton::sample());
        let config = EnfaConfig {
            format: OutputFormat::Json,
            ..EnfaConfig::default()
        };
        let report = conversion(&result, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.body).unwrap();
        assert_eq!(value["closures"]["A"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(value["converted"]["finalStates"], serde_json::json!(["A", "B", "C"]));
        let round_trip = Automaton::from_json(&value["converted"].to_string()).unwrap();
        assert_eq!(round_trip, result.converted);
    }

    #[test]
    fn test_conversion_text_sorted() {
        let result = convert(&Automaton::sample());
        let config = EnfaConfig {
            sort_transitions: true,
            ..EnfaConfig::default()
        };
        let report = conversion(&result, &config).unwrap();
        assert!(report.body.contains("ε-closure(A)  = {A, B, C}"));
        let listed: Vec<&str> = report
            .body
            .lines()
            .skip_while(|l| *l != "transitions")
            .skip(1)
            .collect();
        assert_eq!(listed.first(), Some(&"  A --0--> A"));
        assert_eq!(listed.len(), 9);
    }

    #[test]
    fn test_issues_report() {
        let clean = issues(&[], OutputFormat::Text).unwrap();
        assert!(clean.ok);
        assert_eq!(clean.body, "ok\n");

        let broken = Automaton::from_labels(&["A"], &[], &[("A", "B", "x")], Some("A"), &[]);
        let report = issues(&broken.validate(), OutputFormat::Text).unwrap();
        assert!(!report.ok);
        assert_eq!(report.body, "transition #0 references unknown state B\n");
    }
}
