//! Dispatching rules and rule engine for job selection.
//!
//! Each non-preemptive policy is a dispatching rule applied to the set
//! of ready jobs: FCFS ranks by arrival, SJF by burst, Priority by
//! priority value. The rule engine applies rules in sequence and falls
//! back to input order when every rule ties.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, RuleEngine};
//! use cpu_schedule::models::Job;
//!
//! let jobs = vec![
//!     Job::new(1, "long").with_burst(8),
//!     Job::new(2, "short").with_burst(3),
//! ];
//! let engine = RuleEngine::new().with_rule(rules::Sjf);
//! let best = engine.select_best(&jobs);
//! assert_eq!(best, Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first. Scores are exact integers so tick
/// values of any magnitude rank correctly.
pub type RuleScore = i64;

/// A dispatching rule that ranks ready jobs.
///
/// # Score Convention
/// **Lower score = higher precedence.** Rules should return smaller values
/// for jobs that should be dispatched first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Ranking key of a job.
    fn evaluate(&self, job: &Job) -> RuleScore;
}
