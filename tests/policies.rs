//! End-to-end behaviour of the built-in policies.

use cpu_schedule::models::{jobs_from_processes, Job, JobState};
use cpu_schedule::report::{ComparisonReport, NullChartSink};
use cpu_schedule::scheduler::{Policy, ScheduleMetrics, SimulationRun};
use cpu_schedule::source::{fallback_processes, RandomWorkload};

fn textbook() -> Vec<Job> {
    vec![
        Job::new(1, "P1").with_burst(5),
        Job::new(2, "P2").with_burst(3),
        Job::new(3, "P3").with_burst(8),
    ]
}

fn all_policies() -> Vec<Policy> {
    vec![
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin { quantum: 1 },
        Policy::RoundRobin { quantum: 3 },
        Policy::RoundRobin { quantum: 50 },
    ]
}

fn simulate(policy: Policy, jobs: &[Job]) -> (SimulationRun, ScheduleMetrics) {
    let run = policy.scheduler().unwrap().run(jobs).unwrap();
    let metrics = ScheduleMetrics::for_run(&run).unwrap();
    (run, metrics)
}

#[test]
fn fcfs_textbook() {
    let (run, metrics) = simulate(Policy::Fcfs, &textbook());
    assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]);
    assert!((metrics.avg_waiting - 13.0 / 3.0).abs() < 1e-10);
    assert_eq!(format!("{:.2}", metrics.avg_waiting), "4.33");
}

#[test]
fn sjf_textbook() {
    let (run, metrics) = simulate(Policy::Sjf, &textbook());
    assert_eq!(run.schedule.as_tuples(), vec![(2, 0, 3), (1, 3, 8), (3, 8, 16)]);
    assert_eq!(format!("{:.2}", metrics.avg_waiting), "3.67");
}

#[test]
fn round_robin_textbook() {
    let (run, metrics) = simulate(Policy::RoundRobin { quantum: 3 }, &textbook());
    assert_eq!(
        run.schedule.as_tuples(),
        vec![
            (1, 0, 3),
            (2, 3, 6),
            (3, 6, 9),
            (1, 9, 11),
            (3, 11, 14),
            (3, 14, 16),
        ]
    );
    assert_eq!(metrics.job(1).unwrap().completion, 11);
    assert_eq!(metrics.job(2).unwrap().completion, 6);
    assert_eq!(metrics.job(3).unwrap().completion, 16);
}

#[test]
fn priority_on_sample_data() {
    let jobs = jobs_from_processes(&fallback_processes());
    let (run, _) = simulate(Policy::Priority, &jobs);
    assert_eq!(
        run.schedule.as_tuples(),
        vec![(2, 0, 3), (4, 3, 9), (1, 9, 14), (5, 14, 16), (3, 16, 24)]
    );
}

#[test]
fn turnaround_identity_holds_for_every_policy() {
    let workloads = vec![
        textbook(),
        jobs_from_processes(&fallback_processes()),
        RandomWorkload::default().with_jobs(25).with_seed(11).generate(),
    ];

    for jobs in &workloads {
        for policy in all_policies() {
            let (run, metrics) = simulate(policy, jobs);
            assert_eq!(metrics.jobs.len(), jobs.len(), "{policy}");
            assert!(run.schedule.verify(jobs).is_empty(), "{policy}");
            for row in &metrics.jobs {
                assert!(row.waiting >= 0, "{policy}: pid {}", row.pid);
                assert_eq!(row.turnaround, row.waiting + row.burst, "{policy}");
            }
        }
    }
}

#[test]
fn fcfs_dispatches_in_arrival_order() {
    let jobs = RandomWorkload::default()
        .with_jobs(20)
        .with_seed(5)
        .staggered(true)
        .generate();
    let (run, _) = simulate(Policy::Fcfs, &jobs);

    let arrival = |pid| jobs.iter().find(|j| j.pid == pid).map(|j| j.arrival).unwrap();
    for pair in run.schedule.slices.windows(2) {
        assert!(arrival(pair[0].pid) <= arrival(pair[1].pid));
        assert!(pair[0].end <= pair[1].start);
    }
}

fn by_burst(job: &Job) -> i64 {
    job.burst
}

fn by_priority(job: &Job) -> i64 {
    job.priority.into()
}

#[test]
fn non_preemptive_choice_is_minimal_among_ready() {
    let jobs = RandomWorkload::default()
        .with_jobs(30)
        .with_seed(21)
        .staggered(true)
        .generate();

    let cases: [(Policy, fn(&Job) -> i64); 2] =
        [(Policy::Sjf, by_burst), (Policy::Priority, by_priority)];

    for (policy, key) in cases {
        let (run, _) = simulate(policy, &jobs);
        let mut done: Vec<u32> = Vec::new();
        for slice in &run.schedule.slices {
            let chosen = jobs.iter().find(|j| j.pid == slice.pid).unwrap();
            let best_ready = jobs
                .iter()
                .filter(|j| j.arrival <= slice.start && !done.contains(&j.pid))
                .map(key)
                .min()
                .unwrap();
            assert_eq!(key(chosen), best_ready, "{policy} at t={}", slice.start);
            done.push(slice.pid);
        }
    }
}

#[test]
fn round_robin_slices_a_lone_job_by_quantum() {
    let jobs = vec![Job::new(7, "solo").with_burst(10)];
    for quantum in 1..=12 {
        let (run, _) = simulate(Policy::RoundRobin { quantum }, &jobs);
        let expected = (10 + quantum - 1) / quantum;
        assert_eq!(run.schedule.len() as i64, expected, "q={quantum}");
        assert_eq!(run.schedule.executed_time(7), 10);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let jobs = jobs_from_processes(&fallback_processes());
    let first = ComparisonReport::run(&jobs, &all_policies(), &mut NullChartSink).unwrap();
    let second = ComparisonReport::run(&jobs, &all_policies(), &mut NullChartSink).unwrap();

    assert_eq!(first.summary(), second.summary());
    for (a, b) in first.reports.iter().zip(&second.reports) {
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.metrics.jobs, b.metrics.jobs);
    }
}

#[test]
fn metrics_reject_empty_input() {
    let err = ScheduleMetrics::calculate(&Vec::<JobState>::new()).unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn summary_follows_invocation_order() {
    let policies = [Policy::Priority, Policy::RoundRobin { quantum: 2 }, Policy::Fcfs];
    let report = ComparisonReport::run(&textbook(), &policies, &mut NullChartSink).unwrap();
    let names: Vec<String> = report.summary().into_iter().map(|r| r.policy).collect();
    assert_eq!(names, vec!["Priority", "Round Robin", "FCFS"]);
}
