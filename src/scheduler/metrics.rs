//! Schedule performance metrics.
//!
//! Computes per-job and aggregate statistics from a completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | completion - arrival - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | latest completion |
//! | CPU Utilization | total burst / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::error::{InvariantViolation, SimError};
use crate::models::{JobState, Pid, Ticks};
use crate::validation::ValidationError;

use super::SimulationRun;

/// Metrics of a single completed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMetrics {
    pub pid: Pid,
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i32,
    pub start: Ticks,
    pub completion: Ticks,
    /// Time spent ready but not running.
    pub waiting: Ticks,
    /// Time from arrival to completion.
    pub turnaround: Ticks,
    /// Time from arrival to first dispatch.
    pub response: Ticks,
}

/// Per-job and aggregate metrics of one run.
///
/// Per-job rows keep the order of the run's job list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Per-job rows.
    pub jobs: Vec<JobMetrics>,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest completion time.
    pub makespan: Ticks,
    /// Busy fraction of `[0, makespan)` (0.0..1.0).
    pub cpu_utilization: f64,
}

impl ScheduleMetrics {
    /// Computes metrics from completed job states.
    ///
    /// # Errors
    /// - [`SimError::InvalidInput`] for an empty list.
    /// - [`SimError::Invariant`] if a job never started or completed, was
    ///   dispatched before it arrived, or ends up with a negative waiting
    ///   time.
    pub fn calculate(jobs: &[JobState]) -> Result<Self, SimError> {
        if jobs.is_empty() {
            return Err(SimError::invalid(ValidationError::empty_job_list()));
        }

        let mut rows = Vec::with_capacity(jobs.len());
        // Per-job values fit in Ticks; their sums may not.
        let mut total_waiting: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut total_response: i128 = 0;
        let mut total_burst: i128 = 0;
        let mut makespan: Ticks = 0;

        for state in jobs {
            let job = &state.job;
            let (Some(start), Some(completion)) = (state.start, state.completion) else {
                return Err(InvariantViolation::IncompleteJob { pid: job.pid }.into());
            };

            if start < job.arrival {
                return Err(InvariantViolation::EarlyDispatch {
                    pid: job.pid,
                    start,
                    arrival: job.arrival,
                }
                .into());
            }

            let turnaround = completion - job.arrival;
            let waiting = turnaround - job.burst;
            if waiting < 0 {
                return Err(InvariantViolation::NegativeWaiting {
                    pid: job.pid,
                    waiting,
                }
                .into());
            }
            let response = start - job.arrival;

            total_waiting += i128::from(waiting);
            total_turnaround += i128::from(turnaround);
            total_response += i128::from(response);
            total_burst += i128::from(job.burst);
            makespan = makespan.max(completion);

            rows.push(JobMetrics {
                pid: job.pid,
                name: job.name.clone(),
                arrival: job.arrival,
                burst: job.burst,
                priority: job.priority,
                start,
                completion,
                waiting,
                turnaround,
                response,
            });
        }

        let n = rows.len() as f64;
        let cpu_utilization = if makespan <= 0 {
            0.0
        } else {
            total_burst as f64 / makespan as f64
        };

        Ok(Self {
            jobs: rows,
            avg_waiting: total_waiting as f64 / n,
            avg_turnaround: total_turnaround as f64 / n,
            avg_response: total_response as f64 / n,
            makespan,
            cpu_utilization,
        })
    }

    /// Computes metrics for a simulation run.
    pub fn for_run(run: &SimulationRun) -> Result<Self, SimError> {
        Self::calculate(&run.jobs)
    }

    /// Row for a given job.
    pub fn job(&self, pid: Pid) -> Option<&JobMetrics> {
        self.jobs.iter().find(|m| m.pid == pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn completed(
        pid: Pid,
        arrival: Ticks,
        burst: Ticks,
        start: Ticks,
        completion: Ticks,
    ) -> JobState {
        let mut state = JobState::new(
            Job::new(pid, format!("p{pid}"))
                .with_arrival(arrival)
                .with_burst(burst),
        );
        state.remaining = 0;
        state.start = Some(start);
        state.completion = Some(completion);
        state
    }

    #[test]
    fn test_metrics_basic() {
        let jobs = vec![
            completed(1, 0, 5, 0, 5),
            completed(2, 0, 3, 5, 8),
            completed(3, 0, 8, 8, 16),
        ];
        let m = ScheduleMetrics::calculate(&jobs).unwrap();

        assert_eq!(m.job(2).unwrap().waiting, 5);
        assert_eq!(m.job(3).unwrap().turnaround, 16);
        assert!((m.avg_waiting - 13.0 / 3.0).abs() < 1e-10);
        assert!((m.avg_turnaround - 29.0 / 3.0).abs() < 1e-10);
        assert_eq!(m.makespan, 16);
        assert!((m.cpu_utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_turnaround_identity() {
        let jobs = vec![completed(1, 2, 4, 3, 9), completed(2, 0, 1, 0, 1)];
        let m = ScheduleMetrics::calculate(&jobs).unwrap();
        for row in &m.jobs {
            assert_eq!(row.turnaround, row.waiting + row.burst);
            assert!(row.waiting >= 0);
        }
    }

    #[test]
    fn test_metrics_response_time() {
        // Preempted job: first runs at 1, finishes at 9
        let jobs = vec![completed(1, 0, 4, 1, 9)];
        let m = ScheduleMetrics::calculate(&jobs).unwrap();
        assert_eq!(m.jobs[0].response, 1);
        assert_eq!(m.jobs[0].waiting, 5);
        assert!((m.avg_response - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_utilization_with_idle() {
        let jobs = vec![completed(1, 4, 2, 4, 6), completed(2, 6, 2, 6, 8)];
        let m = ScheduleMetrics::calculate(&jobs).unwrap();
        assert!((m.cpu_utilization - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_empty_is_input_error() {
        let err = ScheduleMetrics::calculate(&[]).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_metrics_incomplete_job_is_fatal() {
        let jobs = vec![
            completed(1, 0, 2, 0, 2),
            JobState::new(Job::new(2, "stuck").with_burst(3)),
        ];
        let err = ScheduleMetrics::calculate(&jobs).unwrap_err();
        assert!(matches!(
            err,
            SimError::Invariant(InvariantViolation::IncompleteJob { pid: 2 })
        ));
    }

    #[test]
    fn test_metrics_dispatch_before_arrival_is_fatal() {
        // Started at 1 but arrived at 4; waiting alone would look fine
        let jobs = vec![completed(1, 4, 2, 1, 9)];
        let err = ScheduleMetrics::calculate(&jobs).unwrap_err();
        assert!(matches!(
            err,
            SimError::Invariant(InvariantViolation::EarlyDispatch {
                pid: 1,
                start: 1,
                arrival: 4
            })
        ));
    }

    #[test]
    fn test_metrics_sums_do_not_overflow() {
        let half = i64::MAX / 2;
        let jobs = vec![completed(1, 0, half, 0, half), completed(2, 0, 1, half, half + 1)];
        let m = ScheduleMetrics::calculate(&jobs).unwrap();
        assert_eq!(m.job(2).unwrap().waiting, half);
        assert!(m.avg_turnaround > 0.0);
    }

    #[test]
    fn test_metrics_negative_waiting_is_fatal() {
        // Completes before it could possibly have run its burst
        let jobs = vec![completed(1, 0, 5, 0, 3)];
        let err = ScheduleMetrics::calculate(&jobs).unwrap_err();
        assert!(matches!(
            err,
            SimError::Invariant(InvariantViolation::NegativeWaiting { pid: 1, waiting: -2 })
        ));
    }
}
