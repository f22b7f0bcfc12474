//! Command-line interface (CLI)
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "enfa",
    version,
    about = "Epsilon-closure, epsilon elimination and step-by-step simulation of finite automata"
)]
pub struct Cli {
    /// Path to the configuration YAML file
    #[arg(short, long, default_value = "enfa.yaml")]
    pub config: PathBuf,

    /// Output format, overriding the configuration file
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the closure table and the epsilon-free transition map
    Convert {
        /// JSON automaton description
        file: PathBuf,
    },
    /// Print the epsilon-closure of one state
    Closure {
        /// JSON automaton description
        file: PathBuf,
        /// State to close over
        state: String,
    },
    /// Trace an input string through the automaton, one character per step
    Simulate {
        /// JSON automaton description
        file: PathBuf,
        /// Input string
        input: String,
    },
    /// Report duplicates and dangling references
    Check {
        /// JSON automaton description
        file: PathBuf,
    },
    /// Print the built-in example automaton as JSON
    Sample,
}
