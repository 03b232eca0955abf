//! First-Come-First-Served scheduler.
//!
//! # Algorithm
//!
//! 1. Stable-sort jobs by arrival (ties keep input order).
//! 2. For each job, advance the clock to `max(now, arrival)`.
//! 3. Run the job to completion; one slice per job.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the simulation.

use tracing::debug;

use super::Scheduler;
use crate::dispatching::{rules, RuleEngine};
use crate::models::{JobState, Schedule};

/// Non-preemptive arrival-order scheduler.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Job;
/// use cpu_schedule::scheduler::{FcfsScheduler, Scheduler};
///
/// let jobs = vec![
///     Job::new(1, "a").with_burst(5),
///     Job::new(2, "b").with_burst(3),
/// ];
/// let run = FcfsScheduler.run(&jobs).unwrap();
/// assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 5), (2, 5, 8)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn simulate(&self, mut states: Vec<JobState>) -> (Vec<JobState>, Schedule) {
        let engine = RuleEngine::new().with_rule(rules::Fcfs);
        engine.sort(&mut states);

        let mut schedule = Schedule::new();
        let mut now = 0;

        for state in &mut states {
            now = now.max(state.job.arrival);
            let run = state.remaining;
            let end = state.execute(now, run);
            debug!(pid = state.job.pid, start = now, end, "dispatch");
            schedule.push(state.job.pid, now, end);
            now = end;
        }

        (states, schedule)
    }
}
