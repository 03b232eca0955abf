//! Simulation errors.
//!
//! Two classes leave the engine: rejected input (the caller's fault,
//! detected before any tick is simulated) and invariant violations (an
//! engine bug, detected after a run). Neither is ever absorbed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Pid, Ticks, Violation};
use crate::validation::ValidationError;

/// Errors produced by policy runs and metric extraction.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    #[error("scheduling invariant broken: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// A correctness bug observed in a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("job {pid} never completed")]
    IncompleteJob { pid: Pid },
    #[error("job {pid} was dispatched at {start} before its arrival at {arrival}")]
    EarlyDispatch { pid: Pid, start: Ticks, arrival: Ticks },
    #[error("job {pid} has negative waiting time {waiting}")]
    NegativeWaiting { pid: Pid, waiting: Ticks },
    #[error("timeline is inconsistent: {}", join_violations(.0))]
    Timeline(Vec<Violation>),
}

impl SimError {
    /// Wraps a single validation error.
    pub fn invalid(error: ValidationError) -> Self {
        Self::InvalidInput(vec![error])
    }

    /// Whether the caller supplied bad input (as opposed to an engine bug).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
