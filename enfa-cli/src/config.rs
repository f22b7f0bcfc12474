//! Configuration system
//!
//! Defaults, then an optional YAML file, then `ENFA_` environment variables.
use std::path::Path;

use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnfaConfig {
    /// Fallback log filter when `RUST_LOG` is not set.
    pub log_level: String,
    pub format: OutputFormat,
    /// Sort converted transitions by (from, symbol, to) before printing.
    pub sort_transitions: bool,
}

impl Default for EnfaConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            format: OutputFormat::Text,
            sort_transitions: false,
        }
    }
}

impl EnfaConfig {
    /// Layers the configuration sources. A missing file is not an error.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ENFA_"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }
}
