//! Simulation configuration.
//!
//! Loaded from an optional TOML file; every field has a default, so an
//! empty file (or no file at all) yields [`SimConfig::default`].
//!
//! ```toml
//! quantum = 4
//! process_limit = 10
//! policies = ["fcfs", "rr"]
//! charts = "file"
//! chart_dir = "charts"
//! source = "random"
//! seed = 42
//! random_jobs = 12
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Ticks;
use crate::report::ChartMode;
use crate::scheduler::{Policy, UnknownPolicy, DEFAULT_QUANTUM};
use crate::source::RandomWorkload;
use crate::validation::{validate_quantum, ValidationError};

/// Errors from loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    UnknownPolicy(#[from] UnknownPolicy),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
    #[error("invalid config: {0}")]
    Other(String),
}

/// Where jobs come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The live process table, with sample data as fallback.
    #[default]
    Live,
    /// The fixed sample data set.
    Sample,
    /// A seeded synthetic workload.
    Random,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Live => "live",
            SourceKind::Sample => "sample",
            SourceKind::Random => "random",
        })
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "ps" => Ok(SourceKind::Live),
            "sample" | "fallback" => Ok(SourceKind::Sample),
            "random" => Ok(SourceKind::Random),
            other => Err(ConfigError::Other(format!(
                "unknown source '{other}' (expected live, sample or random)"
            ))),
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Round-Robin time quantum.
    pub quantum: Ticks,
    /// Maximum number of live processes to read.
    pub process_limit: usize,
    /// Policy names in invocation order.
    pub policies: Vec<String>,
    /// Chart output.
    pub charts: ChartMode,
    /// Output directory for `charts = "file"`.
    pub chart_dir: PathBuf,
    /// Job source.
    pub source: SourceKind,
    /// Seed for the random source.
    pub seed: u64,
    /// Job count for the random source.
    pub random_jobs: usize,
    /// Bernoulli arrivals for the random source.
    pub staggered: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            process_limit: 5,
            policies: ["fcfs", "sjf", "rr", "priority"]
                .into_iter()
                .map(String::from)
                .collect(),
            charts: ChartMode::None,
            chart_dir: PathBuf::from("."),
            source: SourceKind::Live,
            seed: 0,
            random_jobs: 8,
            staggered: false,
        }
    }
}

impl SimConfig {
    /// Loads a config file, or returns defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Checks the quantum, the limits and that every policy name parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_quantum(self.quantum)?;
        if self.process_limit == 0 {
            return Err(ConfigError::Other("process_limit must be at least 1".into()));
        }
        if self.source == SourceKind::Random && self.random_jobs == 0 {
            return Err(ConfigError::Other("random_jobs must be at least 1".into()));
        }
        if self.policies.is_empty() {
            return Err(ConfigError::Other("no policies selected".into()));
        }
        self.policies()?;
        Ok(())
    }

    /// Parsed policies with the configured quantum applied to Round Robin.
    pub fn policies(&self) -> Result<Vec<Policy>, ConfigError> {
        self.policies
            .iter()
            .map(|name| Ok(name.parse::<Policy>()?.with_quantum(self.quantum)))
            .collect()
    }

    /// The synthetic workload described by this config.
    pub fn random_workload(&self) -> RandomWorkload {
        RandomWorkload::default()
            .with_jobs(self.random_jobs)
            .with_seed(self.seed)
            .staggered(self.staggered)
    }
}
