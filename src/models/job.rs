//! Job (process stand-in) model.
//!
//! A job is the unit the simulated CPU multiplexes. The immutable
//! [`Job`] record is shared read-only by every policy run; each run
//! builds its own [`JobState`] vector from it, so no simulation can
//! observe another one's progress.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier.
pub type Pid = u32;

/// Simulated time in ticks.
pub type Ticks = i64;

/// A job to be scheduled.
///
/// `priority` follows the Unix convention: a lower value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier within a run.
    pub pid: Pid,
    /// Human-readable label (command name).
    pub name: String,
    /// Tick at which the job becomes eligible.
    pub arrival: Ticks,
    /// Total CPU time required.
    pub burst: Ticks,
    /// Scheduling precedence (lower = more important).
    pub priority: i32,
}

impl Job {
    /// Creates a job arriving at t=0 with a burst of one tick.
    pub fn new(pid: Pid, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            arrival: 0,
            burst: 1,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival: Ticks) -> Self {
        self.arrival = arrival;
        self
    }

    /// Sets the CPU burst length.
    pub fn with_burst(mut self, burst: Ticks) -> Self {
        self.burst = burst;
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl AsRef<Job> for Job {
    fn as_ref(&self) -> &Job {
        self
    }
}

/// Per-run simulation state of one job.
///
/// Owned by exactly one simulation. `remaining` starts at `burst` and only
/// decreases; `start` and `completion` are written once each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    /// The input record this state tracks.
    pub job: Job,
    /// CPU time still owed to the job.
    pub remaining: Ticks,
    /// First dispatch time.
    pub start: Option<Ticks>,
    /// Time at which `remaining` reached zero.
    pub completion: Option<Ticks>,
}

impl JobState {
    /// Creates fresh state with `remaining == burst`.
    pub fn new(job: Job) -> Self {
        Self {
            remaining: job.burst,
            job,
            start: None,
            completion: None,
        }
    }

    /// Builds independent states for a whole job list.
    pub fn fresh(jobs: &[Job]) -> Vec<Self> {
        jobs.iter().cloned().map(Self::new).collect()
    }

    /// Whether the job has received all of its CPU time.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// Runs the job for `run` ticks starting at `now`.
    ///
    /// Records `start` on the first dispatch and `completion` when the
    /// remaining work reaches zero. Returns the end of the executed slice.
    pub(crate) fn execute(&mut self, now: Ticks, run: Ticks) -> Ticks {
        debug_assert!(run > 0 && run <= self.remaining, "run {run} out of range");
        if self.start.is_none() {
            self.start = Some(now);
        }
        let end = now + run;
        self.remaining -= run;
        if self.remaining == 0 {
            self.completion = Some(end);
        }
        end
    }
}

impl AsRef<Job> for JobState {
    fn as_ref(&self) -> &Job {
        &self.job
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(7, "cc1")
            .with_arrival(4)
            .with_burst(9)
            .with_priority(-5);

        assert_eq!(job.pid, 7);
        assert_eq!(job.name, "cc1");
        assert_eq!(job.arrival, 4);
        assert_eq!(job.burst, 9);
        assert_eq!(job.priority, -5);
    }

    #[test]
    fn test_job_defaults() {
        let job = Job::new(1, "init");
        assert_eq!(job.arrival, 0);
        assert_eq!(job.burst, 1);
        assert_eq!(job.priority, 0);
    }

    #[test]
    fn test_state_starts_with_full_burst() {
        let state = JobState::new(Job::new(1, "a").with_burst(6));
        assert_eq!(state.remaining, 6);
        assert!(state.start.is_none());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_execute_records_start_once() {
        let mut state = JobState::new(Job::new(1, "a").with_burst(5));

        assert_eq!(state.execute(2, 3), 5);
        assert_eq!(state.start, Some(2));
        assert_eq!(state.remaining, 2);
        assert!(state.completion.is_none());

        assert_eq!(state.execute(9, 2), 11);
        assert_eq!(state.start, Some(2));
        assert_eq!(state.remaining, 0);
        assert_eq!(state.completion, Some(11));
    }

    #[test]
    fn test_fresh_states_are_independent() {
        let jobs = vec![Job::new(1, "a").with_burst(4)];
        let mut first = JobState::fresh(&jobs);
        first[0].execute(0, 4);

        let second = JobState::fresh(&jobs);
        assert_eq!(second[0].remaining, 4);
        assert!(second[0].completion.is_none());
        assert_eq!(jobs[0].burst, 4);
    }
}
