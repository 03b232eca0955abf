//! CPU scheduling domain models.
//!
//! Provides the input records, per-run simulation state and the
//! execution timeline produced by a policy.
//!
//! # Lifecycle
//!
//! | Type | Owner | Mutated by |
//! |------|-------|-----------|
//! | `RawProcess` | process source | nobody |
//! | `Job` | caller, shared read-only | nobody |
//! | `JobState` | one simulation run | that run only |
//! | `Schedule` | one simulation run | that run only |

mod job;
mod process;
mod schedule;

pub use job::{Job, JobState, Pid, Ticks};
pub use process::{jobs_from_processes, RawProcess, BURST_CLAMP_MAX, BURST_CLAMP_MIN};
pub use schedule::{Schedule, Slice, Violation, ViolationType};
