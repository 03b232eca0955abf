//! Discrete-time CPU scheduling simulator.
//!
//! Runs classic uniprocessor policies over the same job list and compares
//! their waiting and turnaround times.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobState`, `RawProcess`, `Schedule`, `Slice`
//! - **`validation`**: Input integrity checks (empty lists, bad bursts, duplicate PIDs, quanta)
//! - **`dispatching`**: Ranking rules (FCFS, SJF, Priority) and the `RuleEngine`
//! - **`scheduler`**: Policy simulators, the `Policy` selector and `ScheduleMetrics`
//! - **`report`**: Multi-policy comparison, Gantt chart sinks and text tables
//! - **`source`**: Process table provider with sample fallback, random workloads
//! - **`config`**: TOML configuration
//!
//! # Time model
//!
//! Time is an integer tick counter starting at 0. A job runs in one or more
//! half-open slices `[start, end)`; the CPU never runs two slices at once.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod source;
pub mod validation;

pub use error::{InvariantViolation, SimError};
