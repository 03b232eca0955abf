//! Multi-policy comparison reports.
//!
//! [`ComparisonReport::run`] drives every requested policy over the same
//! read-only job list, computes metrics and hands one Gantt chart request
//! per policy to a [`ChartSink`]. Reports keep the invocation order of the
//! policies.
//!
//! Rejected input stops the whole comparison. A policy whose run breaks a
//! scheduling invariant is recorded as a [`PolicyFailure`] and the
//! remaining policies still run.
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::Job;
//! use cpu_schedule::report::{ComparisonReport, NullChartSink};
//! use cpu_schedule::scheduler::Policy;
//!
//! let jobs = vec![
//!     Job::new(1, "a").with_burst(5),
//!     Job::new(2, "b").with_burst(3),
//!     Job::new(3, "c").with_burst(8),
//! ];
//! let report = ComparisonReport::run(&jobs, &[Policy::Fcfs, Policy::Sjf], &mut NullChartSink)
//!     .unwrap();
//!
//! let summary = report.summary();
//! assert_eq!(summary[0].policy, "FCFS");
//! assert!((summary[1].avg_waiting - 11.0 / 3.0).abs() < 1e-10);
//! ```

mod chart;
mod table;

pub use chart::{
    chart_file_stem, chart_title, ChartError, ChartMode, ChartRequest, ChartSink, FileChartSink,
    NullChartSink, TerminalChartSink, UnknownChartMode,
};
pub use table::{render_policy_table, render_process_table, render_summary_table};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{InvariantViolation, SimError};
use crate::models::{Job, Schedule};
use crate::scheduler::{Policy, ScheduleMetrics};

/// A policy run that could not be reported.
#[derive(Debug, Error)]
#[error("{policy}: {source}")]
pub struct ReportError {
    /// Display name of the failing policy.
    pub policy: String,
    /// Underlying simulation error.
    #[source]
    pub source: SimError,
}

/// Outcome of one policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyReport {
    /// Policy display name (e.g., "Round Robin").
    pub policy: String,
    pub metrics: ScheduleMetrics,
    pub schedule: Schedule,
}

impl PolicyReport {
    /// Runs one policy and computes its metrics.
    pub fn run(jobs: &[Job], policy: &Policy) -> Result<Self, SimError> {
        let run = policy.scheduler()?.run(jobs)?;
        let metrics = ScheduleMetrics::for_run(&run)?;

        Ok(Self {
            policy: policy.name().to_string(),
            metrics,
            schedule: run.schedule,
        })
    }

    /// The chart request for this report.
    pub fn chart(&self) -> ChartRequest {
        ChartRequest::for_policy(&self.policy, &self.schedule)
    }
}

/// One line of the comparison summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub policy: String,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
}

/// A policy whose run was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFailure {
    pub policy: String,
    pub violation: InvariantViolation,
}

/// Reports of several policies over the same input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Per-policy reports in invocation order.
    pub reports: Vec<PolicyReport>,
    /// Policies that broke an invariant, in invocation order.
    pub failures: Vec<PolicyFailure>,
}

impl ComparisonReport {
    /// Runs `policies` in order over `jobs`.
    ///
    /// Each finished policy submits its chart to `sink`. Sink failures are
    /// logged and do not affect the report.
    ///
    /// # Errors
    /// Input errors (an invalid job list or quantum) abort the comparison.
    /// Invariant violations only drop the offending policy into
    /// [`ComparisonReport::failures`].
    pub fn run(
        jobs: &[Job],
        policies: &[Policy],
        sink: &mut dyn ChartSink,
    ) -> Result<Self, ReportError> {
        let mut reports = Vec::with_capacity(policies.len());
        let mut failures = Vec::new();

        for policy in policies {
            debug!(%policy, jobs = jobs.len(), "running policy");
            let report = match PolicyReport::run(jobs, policy) {
                Ok(report) => report,
                Err(SimError::Invariant(violation)) => {
                    warn!(%policy, error = %violation, "policy run abandoned");
                    failures.push(PolicyFailure {
                        policy: policy.name().to_string(),
                        violation,
                    });
                    continue;
                }
                Err(source) => {
                    return Err(ReportError {
                        policy: policy.to_string(),
                        source,
                    })
                }
            };

            if let Err(e) = sink.submit(&report.chart()) {
                warn!(policy = %report.policy, error = %e, "chart was not rendered");
            }
            reports.push(report);
        }

        Ok(Self { reports, failures })
    }

    /// Average waiting and turnaround time per policy, in invocation order.
    pub fn summary(&self) -> Vec<SummaryRow> {
        self.reports
            .iter()
            .map(|r| SummaryRow {
                policy: r.policy.clone(),
                avg_waiting: r.metrics.avg_waiting,
                avg_turnaround: r.metrics.avg_turnaround,
            })
            .collect()
    }

    /// Whether every policy produced a report.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Report of a policy by display name.
    pub fn get(&self, policy: &str) -> Option<&PolicyReport> {
        self.reports.iter().find(|r| r.policy == policy)
    }
}
