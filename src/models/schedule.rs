//! Schedule (execution timeline) model.
//!
//! A schedule is the ordered list of execution slices a policy produced
//! on the single simulated CPU. Preemptive policies may emit several
//! slices for the same job.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5 (Gantt charts)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Job, Pid, Ticks};

/// An execution timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Slices in dispatch order.
    pub slices: Vec<Slice>,
}

/// One contiguous dispatch of a job: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Dispatched job.
    pub pid: Pid,
    /// Dispatch time.
    pub start: Ticks,
    /// Preemption or completion time.
    pub end: Ticks,
}

/// A broken timeline invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Job the violation concerns.
    pub pid: Pid,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timeline violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A slice with `end <= start`.
    EmptySlice,
    /// A slice starts before the previous one ended.
    Overlap,
    /// Slice durations of a job do not add up to its burst.
    BurstMismatch,
    /// A slice refers to a job not in the input.
    UnknownJob,
}

impl Slice {
    /// Creates a new slice.
    pub fn new(pid: Pid, start: Ticks, end: Ticks) -> Self {
        Self { pid, start, end }
    }

    /// Slice length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl From<(Pid, Ticks, Ticks)> for Slice {
    fn from((pid, start, end): (Pid, Ticks, Ticks)) -> Self {
        Self::new(pid, start, end)
    }
}

impl Violation {
    fn new(violation_type: ViolationType, pid: Pid, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            pid,
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice.
    pub fn push(&mut self, pid: Pid, start: Ticks, end: Ticks) {
        self.slices.push(Slice::new(pid, start, end));
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether no slice was recorded.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Latest slice end (0 when empty).
    pub fn makespan(&self) -> Ticks {
        self.slices.iter().map(|s| s.end).max().unwrap_or(0)
    }

    /// Total ticks the CPU spent executing jobs.
    pub fn busy_time(&self) -> Ticks {
        self.slices.iter().map(Slice::duration).sum()
    }

    /// Returns all slices of a job.
    pub fn slices_for_job(&self, pid: Pid) -> Vec<&Slice> {
        self.slices.iter().filter(|s| s.pid == pid).collect()
    }

    /// Total executed time of a job.
    pub fn executed_time(&self, pid: Pid) -> Ticks {
        self.slices_for_job(pid).iter().map(|s| s.duration()).sum()
    }

    /// Completion time for a job (end of its last slice).
    pub fn job_completion_time(&self, pid: Pid) -> Option<Ticks> {
        self.slices_for_job(pid).iter().map(|s| s.end).max()
    }

    /// Slices as plain `(pid, start, end)` tuples.
    pub fn as_tuples(&self) -> Vec<(Pid, Ticks, Ticks)> {
        self.slices.iter().map(|s| (s.pid, s.start, s.end)).collect()
    }

    /// Checks the timeline against the jobs it was built from.
    ///
    /// Checks:
    /// 1. Every slice has `end > start`
    /// 2. Slices do not overlap, in dispatch order
    /// 3. Every slice belongs to an input job
    /// 4. Per-job slice durations sum to the job's burst
    ///
    /// Returns every violation found; an empty vector means the timeline is sound.
    pub fn verify(&self, jobs: &[Job]) -> Vec<Violation> {
        let mut violations = Vec::new();
        let bursts: HashMap<Pid, Ticks> = jobs.iter().map(|j| (j.pid, j.burst)).collect();
        let mut executed: HashMap<Pid, Ticks> = HashMap::new();
        let mut cpu_free_at: Option<Ticks> = None;

        for slice in &self.slices {
            if slice.end <= slice.start {
                violations.push(Violation::new(
                    ViolationType::EmptySlice,
                    slice.pid,
                    format!("Slice [{}, {}) has no length", slice.start, slice.end),
                ));
            }

            if let Some(free_at) = cpu_free_at {
                if slice.start < free_at {
                    violations.push(Violation::new(
                        ViolationType::Overlap,
                        slice.pid,
                        format!("Slice starts at {} but CPU busy until {free_at}", slice.start),
                    ));
                }
            }
            cpu_free_at = Some(cpu_free_at.map_or(slice.end, |t| t.max(slice.end)));

            if !bursts.contains_key(&slice.pid) {
                violations.push(Violation::new(
                    ViolationType::UnknownJob,
                    slice.pid,
                    format!("Slice references unknown job {}", slice.pid),
                ));
            }
            *executed.entry(slice.pid).or_insert(0) += slice.duration();
        }

        for job in jobs {
            let ran = executed.get(&job.pid).copied().unwrap_or(0);
            if ran != job.burst {
                violations.push(Violation::new(
                    ViolationType::BurstMismatch,
                    job.pid,
                    format!("Job {} ran {ran} of {} ticks", job.pid, job.burst),
                ));
            }
        }

        violations
    }
}
