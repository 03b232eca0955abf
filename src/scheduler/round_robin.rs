//! Round-Robin scheduler.
//!
//! # Algorithm
//!
//! All jobs are treated as ready at t=0 (no arrival gating). The job list
//! is scanned repeatedly in input order; every unfinished job runs for
//! `min(quantum, remaining)` ticks per visit. A job whose burst is an
//! exact multiple of the quantum completes on its last full slice; no
//! empty slice is ever emitted.
//!
//! # Termination
//! Every visit to an unfinished job removes at least one tick of the
//! finite total remaining work.

use tracing::debug;

use super::Scheduler;
use crate::error::SimError;
use crate::models::{JobState, Schedule, Ticks};
use crate::validation::validate_quantum;

/// Default time quantum.
pub const DEFAULT_QUANTUM: Ticks = 3;

/// Preemptive fixed-quantum scheduler.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Job;
/// use cpu_schedule::scheduler::{RoundRobinScheduler, Scheduler};
///
/// let jobs = vec![
///     Job::new(1, "a").with_burst(5),
///     Job::new(2, "b").with_burst(3),
/// ];
/// let run = RoundRobinScheduler::new(3).unwrap().run(&jobs).unwrap();
/// assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 3), (2, 3, 6), (1, 6, 8)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the given quantum.
    ///
    /// # Errors
    /// [`SimError::InvalidInput`] if `quantum < 1`.
    pub fn new(quantum: Ticks) -> Result<Self, SimError> {
        validate_quantum(quantum).map_err(SimError::invalid)?;
        Ok(Self { quantum })
    }

    /// Ticks per dispatch.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn simulate(&self, mut states: Vec<JobState>) -> (Vec<JobState>, Schedule) {
        let mut schedule = Schedule::new();
        let mut now = 0;
        let mut round = 0;

        while states.iter().any(|s| s.remaining > 0) {
            round += 1;
            for state in states.iter_mut().filter(|s| s.remaining > 0) {
                let run = self.quantum.min(state.remaining);
                let end = state.execute(now, run);
                debug!(
                    round,
                    pid = state.job.pid,
                    start = now,
                    end,
                    remaining = state.remaining,
                    "dispatch"
                );
                schedule.push(state.job.pid, now, end);
                now = end;
            }
        }

        (states, schedule)
    }
}
