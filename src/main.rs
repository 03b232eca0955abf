mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use cpu_schedule::config::{SimConfig, SourceKind};
use cpu_schedule::models::{jobs_from_processes, Job};
use cpu_schedule::report::{
    render_policy_table, render_process_table, render_summary_table, ChartSink,
    ComparisonReport,
};
use cpu_schedule::source::{load_processes, FallbackSource, PsProcessSource};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = SimConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    apply_overrides(&mut config, &args)?;
    config.validate().context("invalid configuration")?;

    let jobs = load_jobs(&config, !args.json);
    if jobs.is_empty() {
        bail!("no jobs to schedule");
    }
    info!(source = %config.source, jobs = jobs.len(), "jobs loaded");

    let policies = config.policies()?;
    // JSON owns stdout; terminal charts go to stderr instead.
    let mut sink: Box<dyn ChartSink> = if args.json {
        config
            .charts
            .sink_with_terminal(&config.chart_dir, std::io::stderr())
    } else {
        config.charts.sink(&config.chart_dir)
    };
    let report = ComparisonReport::run(&jobs, &policies, sink.as_mut())
        .context("simulation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        for policy in &report.reports {
            println!("{}", render_policy_table(policy));
        }
        println!("Summary:");
        print!("{}", render_summary_table(&report.summary()));
    }

    for failure in &report.failures {
        eprintln!("error: {} failed: {}", failure.policy, failure.violation);
    }
    if !report.is_complete() {
        bail!(
            "{} of {} policies failed",
            report.failures.len(),
            policies.len()
        );
    }

    Ok(())
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(config: &mut SimConfig, args: &CliArgs) -> Result<()> {
    if let Some(quantum) = args.quantum {
        config.quantum = quantum;
    }
    if let Some(limit) = args.limit {
        config.process_limit = limit;
    }
    if !args.policies.is_empty() {
        config.policies = args.policies.clone();
    }
    if let Some(source) = &args.source {
        config.source = source.parse()?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(n) = args.random_jobs {
        config.random_jobs = n;
    }
    if args.staggered {
        config.staggered = true;
    }
    if let Some(charts) = &args.charts {
        config.charts = charts.parse()?;
    }
    if let Some(dir) = &args.chart_dir {
        config.chart_dir = dir.clone();
    }
    Ok(())
}

fn load_jobs(config: &SimConfig, print_table: bool) -> Vec<Job> {
    let processes = match config.source {
        SourceKind::Random => return config.random_workload().generate(),
        SourceKind::Live => load_processes(&PsProcessSource::new(), config.process_limit),
        SourceKind::Sample => load_processes(&FallbackSource, config.process_limit),
    };

    if print_table {
        println!("Processes:");
        println!("{}", render_process_table(&processes));
    }
    jobs_from_processes(&processes)
}
