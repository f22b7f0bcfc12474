use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use enfa::{Automaton, State, convert};
use tracing::info;

mod cli;
mod config;
mod logging;
mod report;

use cli::{Cli, Command};
use config::EnfaConfig;
use report::Report;

fn load(path: &Path) -> anyhow::Result<Automaton> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let automaton = Automaton::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse {}", path.display()))?;
    info!(
        path = %path.display(),
        states = automaton.states().len(),
        transitions = automaton.transitions().len(),
        "loaded automaton"
    );
    Ok(automaton)
}

fn run(command: &Command, config: &EnfaConfig) -> anyhow::Result<Report> {
    let report = match command {
        Command::Convert { file } => {
            let automaton = load(file)?;
            report::conversion(&convert(&automaton), config)?
        }
        Command::Closure { file, state } => {
            let automaton = load(file)?;
            if !automaton.has_state(state) {
                bail!("state {state} is not part of {}", file.display());
            }
            let closure = automaton.epsilon_closure(state);
            report::closure(&State::from(state.as_str()), &closure, config.format)?
        }
        Command::Simulate { file, input } => {
            let automaton = load(file)?;
            report::simulation(&automaton, input, config.format)?
        }
        Command::Check { file } => {
            let automaton = load(file)?;
            report::issues(&automaton.validate(), config.format)?
        }
        Command::Sample => Report {
            body: Automaton::sample().to_json()? + "\n",
            ok: true,
        },
    };
    Ok(report)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = EnfaConfig::load(&cli.config)
        .with_context(|| format!("invalid configuration in {}", cli.config.display()))?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    logging::init(&config.log_level);

    let report = run(&cli.command, &config)?;
    print!("{}", report.body);

    Ok(if report.ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
