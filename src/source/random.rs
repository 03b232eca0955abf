//! Seeded synthetic workloads.
//!
//! Each job is short with probability `p_short`, long otherwise. By default
//! every job arrives at tick 0. A staggered workload instead arrives as a
//! Bernoulli process: at every tick one job arrives with probability
//! `p_arrival`. Equal seeds produce equal workloads.
//!
//! Round Robin dispatches without looking at arrival times, so a staggered
//! workload can make it report a negative waiting time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Job, Ticks};

/// Parameters of a synthetic workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomWorkload {
    /// Number of jobs to generate.
    pub jobs: usize,
    /// Spread arrivals over time instead of releasing everything at 0.
    pub staggered: bool,
    /// Per-tick arrival probability, (0.0..=1.0].
    pub p_arrival: f64,
    /// Probability that a job is short.
    pub p_short: f64,
    /// Burst of a short job.
    pub short_burst: Ticks,
    /// Burst of a long job.
    pub long_burst: Ticks,
    /// Inclusive priority range.
    pub min_priority: i32,
    pub max_priority: i32,
    /// RNG seed.
    pub seed: u64,
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self {
            jobs: 8,
            staggered: false,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            min_priority: 0,
            max_priority: 39,
            seed: 0,
        }
    }
}

impl RandomWorkload {
    /// Sets the number of jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enables Bernoulli arrivals.
    pub fn staggered(mut self, staggered: bool) -> Self {
        self.staggered = staggered;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates the workload. PIDs are assigned 1, 2, ... in arrival order.
    ///
    /// A non-positive `p_arrival` is treated as 1.0 so generation always
    /// terminates.
    pub fn generate(&self) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let p_arrival = if self.p_arrival > 0.0 {
            self.p_arrival.min(1.0)
        } else {
            1.0
        };
        let (lo, hi) = if self.min_priority <= self.max_priority {
            (self.min_priority, self.max_priority)
        } else {
            (self.max_priority, self.min_priority)
        };

        let mut jobs = Vec::with_capacity(self.jobs);
        let mut tick: Ticks = 0;

        while jobs.len() < self.jobs {
            if !self.staggered || rng.random::<f64>() < p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };
                let pid = jobs.len() as u32 + 1;
                jobs.push(
                    Job::new(pid, format!("job{pid}"))
                        .with_arrival(tick)
                        .with_burst(burst)
                        .with_priority(rng.random_range(lo..=hi)),
                );
            }
            if self.staggered {
                tick += 1;
            }
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_jobs() {
        let w = RandomWorkload::default().with_jobs(20).with_seed(42);
        assert_eq!(w.generate(), w.generate());
    }

    #[test]
    fn test_different_seed_differs() {
        let a = RandomWorkload::default().with_jobs(20).with_seed(1).generate();
        let b = RandomWorkload::default().with_jobs(20).with_seed(2).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unstaggered_arrives_at_zero() {
        let jobs = RandomWorkload::default().with_jobs(10).with_seed(3).generate();
        assert_eq!(jobs.len(), 10);
        assert!(jobs.iter().all(|j| j.arrival == 0));
    }

    #[test]
    fn test_shape() {
        let w = RandomWorkload::default()
            .with_jobs(30)
            .with_seed(7)
            .staggered(true);
        let jobs = w.generate();

        assert_eq!(jobs.len(), 30);
        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(job.pid, i as u32 + 1);
            assert!(job.burst == w.short_burst || job.burst == w.long_burst);
            assert!((w.min_priority..=w.max_priority).contains(&job.priority));
        }
        assert!(jobs.windows(2).all(|p| p[0].arrival < p[1].arrival));
    }

    #[test]
    fn test_zero_probability_terminates() {
        let w = RandomWorkload {
            p_arrival: 0.0,
            ..RandomWorkload::default()
        }
        .with_jobs(3)
        .staggered(true);
        let arrivals: Vec<i64> = w.generate().iter().map(|j| j.arrival).collect();
        assert_eq!(arrivals, vec![0, 1, 2]);
    }
}
