//! Greedy non-preemptive scheduler (SJF and Priority).
//!
//! # Algorithm
//!
//! At every decision point:
//! 1. Ready set = unfinished jobs with `arrival <= now`, in input order.
//! 2. Empty ready set: the CPU idles for one tick.
//! 3. Otherwise the rule engine picks the best ready job (first in input
//!    order among ties), which runs to completion.
//!
//! # Complexity
//! O(n^2) decisions plus one idle step per idle tick.

use tracing::{debug, trace};

use super::Scheduler;
use crate::dispatching::{rules, RuleEngine};
use crate::models::{JobState, Schedule};

/// Rule-driven non-preemptive scheduler with arrival gating.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Job;
/// use cpu_schedule::scheduler::{NonPreemptiveScheduler, Scheduler};
///
/// let jobs = vec![
///     Job::new(1, "a").with_burst(5),
///     Job::new(2, "b").with_burst(3),
///     Job::new(3, "c").with_burst(8),
/// ];
/// let run = NonPreemptiveScheduler::shortest_job_first().run(&jobs).unwrap();
/// assert_eq!(run.schedule.as_tuples(), vec![(2, 0, 3), (1, 3, 8), (3, 8, 16)]);
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    name: &'static str,
    engine: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Creates a scheduler selecting by the given rule engine.
    pub fn new(name: &'static str, engine: RuleEngine) -> Self {
        Self { name, engine }
    }

    /// Shortest-Job-First: minimum burst wins.
    pub fn shortest_job_first() -> Self {
        Self::new("SJF", RuleEngine::new().with_rule(rules::Sjf))
    }

    /// Priority: minimum priority value wins.
    pub fn priority() -> Self {
        Self::new("Priority", RuleEngine::new().with_rule(rules::Priority))
    }
}

impl Scheduler for NonPreemptiveScheduler {
    fn name(&self) -> &'static str {
        self.name
    }

    fn simulate(&self, states: Vec<JobState>) -> (Vec<JobState>, Schedule) {
        let mut pending = states;
        let mut done = Vec::with_capacity(pending.len());
        let mut schedule = Schedule::new();
        let mut now = 0;

        while !pending.is_empty() {
            let ready: Vec<usize> = pending
                .iter()
                .enumerate()
                .filter(|(_, s)| s.job.arrival <= now)
                .map(|(i, _)| i)
                .collect();

            let candidates: Vec<&JobState> = ready.iter().map(|&i| &pending[i]).collect();
            let Some(best) = self.engine.select_best(&candidates) else {
                trace!(now, "cpu idle");
                now += 1;
                continue;
            };

            // Vec::remove keeps the remaining jobs in input order.
            let mut state = pending.remove(ready[best]);
            let run = state.remaining;
            let end = state.execute(now, run);
            debug!(
                policy = self.name,
                pid = state.job.pid,
                ready = ready.len(),
                start = now,
                end,
                "dispatch"
            );
            schedule.push(state.job.pid, now, end);
            now = end;
            done.push(state);
        }

        (done, schedule)
    }
}
