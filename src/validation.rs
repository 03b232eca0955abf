//! Input validation for simulation runs.
//!
//! Checks the job list and policy parameters before any policy runs.
//! Detects:
//! - Empty job lists
//! - Negative arrival times
//! - Non-positive bursts
//! - Duplicate PIDs
//! - Timelines whose end would not fit in a tick counter
//! - Non-positive round-robin quanta
//!
//! Nothing is coerced here; the only input coercion in the crate is the
//! burst clamp applied when converting raw process records.

use crate::models::{Job, Ticks};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No jobs to schedule.
    EmptyJobList,
    /// A job arrives before t=0.
    NegativeArrival,
    /// A job needs no CPU time (or a negative amount).
    NonPositiveBurst,
    /// Two jobs share a PID.
    DuplicatePid,
    /// `max(arrival) + sum(burst)` exceeds the tick range.
    HorizonOverflow,
    /// Round-robin quantum below one tick.
    NonPositiveQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The error raised for an empty job list.
    pub fn empty_job_list() -> Self {
        Self::new(ValidationErrorKind::EmptyJobList, "job list is empty")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a job list.
///
/// Checks:
/// 1. At least one job
/// 2. No negative arrival times
/// 3. Every burst is at least one tick
/// 4. No duplicate PIDs
/// 5. The latest possible completion, `max(arrival) + sum(burst)`, fits
///    in [`Ticks`], so no policy can overflow the clock
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    if jobs.is_empty() {
        return Err(vec![ValidationError::empty_job_list()]);
    }

    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for job in jobs {
        if !pids.insert(job.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate PID: {}", job.pid),
            ));
        }

        if job.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Job {} arrives at negative time {}", job.pid, job.arrival),
            ));
        }

        if job.burst < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Job {} has non-positive burst {}", job.pid, job.burst),
            ));
        }
    }

    if errors.is_empty() && horizon(jobs).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Latest arrival plus total burst exceeds the tick range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on every completion time, or `None` on overflow.
fn horizon(jobs: &[Job]) -> Option<Ticks> {
    let latest_arrival = jobs.iter().map(|j| j.arrival).max().unwrap_or(0);
    jobs.iter()
        .try_fold(latest_arrival, |acc, j| acc.checked_add(j.burst))
}

/// Validates a round-robin quantum.
pub fn validate_quantum(quantum: Ticks) -> Result<(), ValidationError> {
    if quantum < 1 {
        return Err(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Quantum must be at least 1, got {quantum}"),
        ));
    }
    Ok(())
}
