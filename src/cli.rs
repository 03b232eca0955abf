use std::path::PathBuf;

use clap::Parser;

/// Compare CPU scheduling policies on a process snapshot.
///
/// Reads the busiest processes from `ps` (or a sample or random job set),
/// simulates each policy and prints per-job metrics and a summary.
#[derive(Parser, Debug)]
#[command(name = "cpu-schedule", version, about = "CPU scheduling policy simulator")]
pub struct CliArgs {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Round-Robin time quantum
    #[arg(long)]
    pub quantum: Option<i64>,

    /// Maximum number of live processes to read
    #[arg(long)]
    pub limit: Option<usize>,

    /// Policy to run: fcfs, sjf, priority or rr (repeatable, runs in the given order)
    #[arg(long = "policy")]
    pub policies: Vec<String>,

    /// Job source: live, sample or random
    #[arg(long)]
    pub source: Option<String>,

    /// Seed for the random source
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of jobs for the random source
    #[arg(long)]
    pub random_jobs: Option<usize>,

    /// Spread random arrivals over time
    #[arg(long)]
    pub staggered: bool,

    /// Chart output: none, file or terminal
    #[arg(long)]
    pub charts: Option<String>,

    /// Directory for chart files
    #[arg(long)]
    pub chart_dir: Option<PathBuf>,

    /// Print the comparison as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}
