//! CPU scheduling policies and metrics.
//!
//! Every policy implements [`Scheduler`]: a pure function from a
//! read-only job list to a [`SimulationRun`]. Each run builds its own
//! [`JobState`] vector, so running policies back to back (or in parallel)
//! never cross-contaminates results.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection key | Arrival gating |
//! |--------|-----------|---------------|----------------|
//! | FCFS | no | arrival | yes (time jumps to arrival) |
//! | SJF | no | burst | yes (idle tick by tick) |
//! | Priority | no | priority value | yes (idle tick by tick) |
//! | Round Robin | yes | scan order | no, all ready at t=0 |
//!
//! # Metrics
//!
//! `ScheduleMetrics` derives waiting, turnaround and response time per job
//! and their averages.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod fcfs;
mod metrics;
mod non_preemptive;
mod round_robin;

pub use fcfs::FcfsScheduler;
pub use metrics::{JobMetrics, ScheduleMetrics};
pub use non_preemptive::NonPreemptiveScheduler;
pub use round_robin::{RoundRobinScheduler, DEFAULT_QUANTUM};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::error::{InvariantViolation, SimError};
use crate::models::{Job, JobState, Schedule, Ticks};
use crate::validation::validate_jobs;

/// Completed jobs and the timeline of one policy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Display name of the policy that produced the run.
    pub policy: String,
    /// Job states with `start`/`completion` populated.
    ///
    /// Order is policy-specific: dispatch order for FCFS, completion order
    /// for SJF and Priority, input order for Round Robin.
    pub jobs: Vec<JobState>,
    /// Execution slices in dispatch order.
    pub schedule: Schedule,
}

/// A CPU scheduling policy.
pub trait Scheduler: fmt::Debug {
    /// Display name (e.g., "Round Robin").
    fn name(&self) -> &'static str;

    /// Simulates the policy over states owned by this call.
    ///
    /// Assumes a validated, non-empty job list.
    fn simulate(&self, states: Vec<JobState>) -> (Vec<JobState>, Schedule);

    /// Validates `jobs`, simulates on a private copy and checks the result.
    ///
    /// # Errors
    /// - [`SimError::InvalidInput`] for an empty or malformed job list.
    /// - [`SimError::Invariant`] when the run leaves a job incomplete or
    ///   produces an inconsistent timeline.
    fn run(&self, jobs: &[Job]) -> Result<SimulationRun, SimError> {
        validate_jobs(jobs)?;

        let (states, schedule) = self.simulate(JobState::fresh(jobs));
        check_run(jobs, &states, &schedule)?;

        info!(
            policy = self.name(),
            jobs = states.len(),
            slices = schedule.len(),
            makespan = schedule.makespan(),
            "simulation complete"
        );

        Ok(SimulationRun {
            policy: self.name().to_string(),
            jobs: states,
            schedule,
        })
    }
}

/// Verifies that a finished run is complete and its timeline is sound.
fn check_run(
    jobs: &[Job],
    states: &[JobState],
    schedule: &Schedule,
) -> Result<(), InvariantViolation> {
    if let Some(state) = states.iter().find(|s| !s.is_complete()) {
        return Err(InvariantViolation::IncompleteJob { pid: state.job.pid });
    }
    if let Some(job) = jobs
        .iter()
        .find(|j| !states.iter().any(|s| s.job.pid == j.pid))
    {
        return Err(InvariantViolation::IncompleteJob { pid: job.pid });
    }

    let violations = schedule.verify(jobs);
    if !violations.is_empty() {
        return Err(InvariantViolation::Timeline(violations));
    }
    Ok(())
}

/// The built-in policies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First (non-preemptive).
    Sjf,
    /// Priority scheduling (non-preemptive, lowest value first).
    Priority,
    /// Round-Robin with a fixed quantum.
    RoundRobin {
        /// Ticks per dispatch.
        quantum: Ticks,
    },
}

impl Policy {
    /// FCFS, SJF, Round Robin (q=3), Priority.
    pub fn defaults() -> Vec<Policy> {
        vec![
            Policy::Fcfs,
            Policy::Sjf,
            Policy::RoundRobin {
                quantum: DEFAULT_QUANTUM,
            },
            Policy::Priority,
        ]
    }

    /// Display name used in reports and chart titles.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Priority => "Priority",
            Policy::RoundRobin { .. } => "Round Robin",
        }
    }

    /// Replaces the quantum of a Round-Robin policy; other policies are unchanged.
    pub fn with_quantum(self, quantum: Ticks) -> Self {
        match self {
            Policy::RoundRobin { .. } => Policy::RoundRobin { quantum },
            other => other,
        }
    }

    /// Builds the simulator for this policy.
    ///
    /// # Errors
    /// [`SimError::InvalidInput`] for a Round-Robin quantum below one.
    pub fn scheduler(&self) -> Result<Box<dyn Scheduler>, SimError> {
        Ok(match *self {
            Policy::Fcfs => Box::new(FcfsScheduler),
            Policy::Sjf => Box::new(NonPreemptiveScheduler::shortest_job_first()),
            Policy::Priority => Box::new(NonPreemptiveScheduler::priority()),
            Policy::RoundRobin { quantum } => Box::new(RoundRobinScheduler::new(quantum)?),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "{} (q={quantum})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Error returned when a policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy '{0}' (expected fcfs, sjf, priority or rr)")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    /// Parses `fcfs`, `sjf`, `priority` or `rr`/`round-robin` (case-insensitive).
    ///
    /// Round-Robin gets [`DEFAULT_QUANTUM`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" | "prio" => Ok(Policy::Priority),
            "rr" | "round-robin" | "round_robin" | "roundrobin" => Ok(Policy::RoundRobin {
                quantum: DEFAULT_QUANTUM,
            }),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    impl Scheduler for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        // Forgets to run the last job.
        fn simulate(&self, mut states: Vec<JobState>) -> (Vec<JobState>, Schedule) {
            let mut schedule = Schedule::new();
            let mut t = 0;
            let n = states.len();
            for state in states.iter_mut().take(n - 1) {
                let run = state.remaining;
                let end = state.execute(t, run);
                schedule.push(state.job.pid, t, end);
                t = end;
            }
            (states, schedule)
        }
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new(1, "a").with_burst(5),
            Job::new(2, "b").with_burst(3),
        ]
    }

    #[test]
    fn test_incomplete_run_is_fatal() {
        let err = Broken.run(&sample_jobs()).unwrap_err();
        assert!(matches!(
            err,
            SimError::Invariant(InvariantViolation::IncompleteJob { pid: 2 })
        ));
    }

    #[test]
    fn test_empty_input_rejected_by_every_policy() {
        for policy in Policy::defaults() {
            let scheduler = policy.scheduler().unwrap();
            let err = scheduler.run(&[]).unwrap_err();
            assert!(err.is_input_error(), "{policy} accepted an empty job list");
        }
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("FCFS".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("sjf".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!(" priority ".parse::<Policy>().unwrap(), Policy::Priority);
        assert_eq!(
            "round-robin".parse::<Policy>().unwrap(),
            Policy::RoundRobin { quantum: 3 }
        );
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_names() {
        let names: Vec<&str> = Policy::defaults().iter().map(Policy::name).collect();
        assert_eq!(names, vec!["FCFS", "SJF", "Round Robin", "Priority"]);
        assert_eq!(Policy::RoundRobin { quantum: 4 }.to_string(), "Round Robin (q=4)");
    }

    #[test]
    fn test_with_quantum() {
        assert_eq!(
            Policy::RoundRobin { quantum: 3 }.with_quantum(5),
            Policy::RoundRobin { quantum: 5 }
        );
        assert_eq!(Policy::Sjf.with_quantum(5), Policy::Sjf);
    }

    #[test]
    fn test_invalid_quantum_rejected() {
        let err = Policy::RoundRobin { quantum: 0 }.scheduler().unwrap_err();
        assert!(err.is_input_error());
    }
}
