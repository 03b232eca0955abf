//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for jobs that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::Job;

/// First-Come-First-Served.
///
/// Earliest arrival first. Together with a stable sort this keeps the
/// input order among simultaneous arrivals.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.arrival
    }
}

/// Shortest Job First.
///
/// Smallest total burst first. Minimizes average waiting time among
/// non-preemptive policies when all jobs are ready together.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.burst
    }
}

/// Priority (lowest value wins).
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        RuleScore::from(job.priority)
    }
}
