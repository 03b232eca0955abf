//! Job sources.
//!
//! The simulator does not own its input. Jobs come from an external
//! process table ([`PsProcessSource`]), a fixed sample set
//! ([`FallbackSource`]) or a seeded synthetic generator
//! ([`RandomWorkload`]).
//!
//! Provider failures never stop a simulation: [`load_processes`] logs a
//! warning and substitutes the fallback set so runs stay reproducible.

mod ps;
mod random;

pub use ps::{parse_ps_output, PsProcessSource};
pub use random::RandomWorkload;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::RawProcess;

/// Errors produced by process sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: String },
    #[error("process table is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("malformed process table line '{line}': {reason}")]
    Malformed { line: String, reason: String },
}

/// A provider of raw process records.
pub trait ProcessSource {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Returns up to `limit` records.
    fn fetch(&self, limit: usize) -> Result<Vec<RawProcess>, SourceError>;
}

/// The fixed sample data set.
///
/// Always returns the same five records, regardless of `limit`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSource;

impl ProcessSource for FallbackSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn fetch(&self, _limit: usize) -> Result<Vec<RawProcess>, SourceError> {
        Ok(fallback_processes())
    }
}

/// Five synthetic processes with pids 1–5.
///
/// | pid | command | elapsed | priority |
/// |-----|---------|---------|----------|
/// | 1 | procA | 5 | 20 |
/// | 2 | procB | 3 | 18 |
/// | 3 | procC | 8 | 22 |
/// | 4 | procD | 6 | 19 |
/// | 5 | procE | 2 | 21 |
pub fn fallback_processes() -> Vec<RawProcess> {
    const ELAPSED: [i64; 5] = [5, 3, 8, 6, 2];
    const PRIORITY: [i32; 5] = [20, 18, 22, 19, 21];
    const CPU: [f64; 5] = [1.2, 0.9, 2.3, 0.5, 1.0];
    const COMMANDS: [&str; 5] = ["procA", "procB", "procC", "procD", "procE"];

    (0..5)
        .map(|i| RawProcess {
            pid: i as u32 + 1,
            command: COMMANDS[i].to_string(),
            elapsed_seconds: ELAPSED[i],
            priority: PRIORITY[i],
            nice: 0,
            cpu_percent: CPU[i],
        })
        .collect()
}

/// Fetches records, falling back to the sample set on failure.
///
/// An empty result is treated like a failure.
pub fn load_processes(source: &dyn ProcessSource, limit: usize) -> Vec<RawProcess> {
    match source.fetch(limit) {
        Ok(processes) if !processes.is_empty() => {
            info!(source = source.name(), count = processes.len(), "fetched processes");
            processes
        }
        Ok(_) => {
            warn!(
                source = source.name(),
                "source returned no processes, using sample data instead"
            );
            fallback_processes()
        }
        Err(e) => {
            warn!(
                source = source.name(),
                error = %e,
                "could not fetch processes, using sample data instead"
            );
            fallback_processes()
        }
    }
}
