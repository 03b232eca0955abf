//! Raw process records and their conversion into jobs.
//!
//! Records come from an external process table (see [`crate::source`]).
//! Elapsed wall time is used as a stand-in for CPU burst, clamped so a
//! long-lived daemon cannot dominate the simulation.

use serde::{Deserialize, Serialize};

use super::{Job, Pid, Ticks};

/// Smallest burst produced from a raw record.
pub const BURST_CLAMP_MIN: Ticks = 1;

/// Largest burst produced from a raw record.
pub const BURST_CLAMP_MAX: Ticks = 20;

/// One row of a process table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProcess {
    /// OS process ID.
    pub pid: Pid,
    /// Command name.
    pub command: String,
    /// Seconds since the process started.
    pub elapsed_seconds: i64,
    /// Kernel priority value.
    pub priority: i32,
    /// Nice value.
    pub nice: i32,
    /// CPU usage in percent.
    pub cpu_percent: f64,
}

impl RawProcess {
    /// Converts the record into a job arriving at t=0.
    ///
    /// The burst is `elapsed_seconds` clamped into
    /// [`BURST_CLAMP_MIN`]..=[`BURST_CLAMP_MAX`]; priority is copied as is.
    pub fn to_job(&self) -> Job {
        Job::new(self.pid, self.command.clone())
            .with_burst(self.elapsed_seconds.clamp(BURST_CLAMP_MIN, BURST_CLAMP_MAX))
            .with_priority(self.priority)
    }
}

/// Converts a process table into jobs, preserving order.
pub fn jobs_from_processes(processes: &[RawProcess]) -> Vec<Job> {
    processes.iter().map(RawProcess::to_job).collect()
}
