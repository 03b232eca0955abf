//! Live process table via `ps`.

use std::process::Command;

use tracing::debug;

use super::{ProcessSource, SourceError};
use crate::models::RawProcess;

const PS_ARGS: [&str; 3] = ["-eo", "pid,comm,etimes,pri,ni,pcpu", "--sort=-pcpu"];

/// Reads the busiest processes from `ps` (Linux procps).
#[derive(Debug, Clone)]
pub struct PsProcessSource {
    program: String,
}

impl PsProcessSource {
    /// Uses the `ps` binary on `PATH`.
    pub fn new() -> Self {
        Self::with_program("ps")
    }

    /// Uses a specific `ps`-compatible binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PsProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for PsProcessSource {
    fn name(&self) -> &'static str {
        "ps"
    }

    fn fetch(&self, limit: usize) -> Result<Vec<RawProcess>, SourceError> {
        let command = format!("{} {}", self.program, PS_ARGS.join(" "));
        debug!(%command, limit, "reading process table");

        let output = Command::new(&self.program)
            .args(PS_ARGS)
            .output()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                command,
                status: output.status.to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)?;
        parse_ps_output(&text, limit)
    }
}

/// Parses `ps -eo pid,comm,etimes,pri,ni,pcpu` output.
///
/// The header line is skipped and at most `limit` lines are considered.
/// Lines with fewer than six fields are skipped; a field that fails to
/// parse as a number rejects the whole table.
pub fn parse_ps_output(text: &str, limit: usize) -> Result<Vec<RawProcess>, SourceError> {
    let mut processes = Vec::new();

    for line in text.trim().lines().skip(1).take(limit) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 6 {
            continue;
        }

        let malformed = |reason: String| SourceError::Malformed {
            line: line.to_string(),
            reason,
        };

        processes.push(RawProcess {
            pid: parts[0]
                .parse()
                .map_err(|e| malformed(format!("pid: {e}")))?,
            command: parts[1].to_string(),
            elapsed_seconds: parts[2]
                .parse()
                .map_err(|e| malformed(format!("etimes: {e}")))?,
            priority: parts[3]
                .parse()
                .map_err(|e| malformed(format!("pri: {e}")))?,
            nice: parts[4]
                .parse()
                .map_err(|e| malformed(format!("ni: {e}")))?,
            cpu_percent: parts[5]
                .parse()
                .map_err(|e| malformed(format!("pcpu: {e}")))?,
        });
    }

    Ok(processes)
}
