//! Adaptive sampling of a measured operation
//!
//! The sampler calibrates a batch size from a single call, then repeats
//! rounds of two sample phases (batches of `n` and of `5n` iterations) until
//! the per-iteration estimate is stable or the time budget is spent:
//!
//! ```text
//! Calibrate ──► Sample(n) ──► Sample(5n) ──► Evaluate ──┬─► Converged
//!                  ▲                                    ├─► TimedOut
//!                  │                                    ├─► OverflowStopped
//!                  └──────────── n *= 2 ◄───────────────┘
//! ```
//!
//! Batches are never interrupted. The budget is only checked between rounds,
//! so a run can overshoot it by at most one round.
//!
//! # Example
//!
//! ```
//! use microbench::clock::ManualClock;
//! use microbench::config::SamplerConfig;
//! use microbench::sampler::{AdaptiveSampler, StopReason};
//!
//! // Every call costs exactly 250ns of simulated time
//! let clock = ManualClock::new();
//! let config = SamplerConfig::default();
//! let sampler = AdaptiveSampler::new(&config, &clock);
//!
//! let report = sampler.run(&mut || clock.advance(250), None).unwrap();
//! assert_eq!(report.reason, StopReason::Converged);
//! assert_eq!(report.summary.median, 250.0);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::bencher::Bencher;
use crate::clock::Clock;
use crate::config::SamplerConfig;
use crate::error::StatsError;
use crate::stats::{accumulate, winsorize, Summary};

/// Why the sampling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Both phases agreed and the spread was small
    Converged,
    /// The cumulative time budget ran out first
    TimedOut,
    /// Growing the batch further would overflow the batch counter
    OverflowStopped,
}

/// Mutable state of one in-flight benchmark.
///
/// Created at calibration and threaded through every phase of the loop; the
/// totals end up in the [`SamplerReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRunState {
    /// Current batch size
    pub n: u64,
    /// Ticks elapsed in the most recent batch
    pub last_elapsed_ticks: u64,
    /// Measured time across all phases, including calibration
    pub total_ns: u64,
    /// Iterations executed across all phases, including calibration
    pub total_iterations: u64,
    /// Bytes processed per iteration, if declared
    pub bytes: Option<u64>,
    /// Completed rounds
    pub rounds: u32,
}

impl BenchRunState {
    pub fn new(bytes: Option<u64>) -> Self {
        Self {
            n: 1,
            last_elapsed_ticks: 0,
            total_ns: 0,
            total_iterations: 0,
            bytes,
            rounds: 0,
        }
    }

    /// Fold a finished phase into the running totals.
    pub fn record(&mut self, iterations: u64, ns: u64) {
        self.total_iterations = accumulate(self.total_iterations, iterations, "total_iterations");
        self.total_ns = accumulate(self.total_ns, ns, "total_ns");
    }
}

/// Outcome of a sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerReport {
    /// Summary of the last long-batch phase
    pub summary: Summary,
    pub reason: StopReason,
    pub total_ns: u64,
    pub total_iterations: u64,
    pub bytes: Option<u64>,
    pub rounds: u32,
    /// Short-phase batch size of the last round
    pub final_batch: u64,
}

impl SamplerReport {
    /// Throughput in MB/s derived from the median, 0 when no byte count was declared.
    pub fn mb_s(&self) -> u64 {
        match self.bytes {
            Some(bytes) => {
                let ns_iter = (self.summary.median as u64).max(1);
                bytes.saturating_mul(1000) / ns_iter
            }
            None => 0,
        }
    }
}

/// What the loop does after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Stop(StopReason),
    Continue { next_batch: u64 },
}

/// The adaptive sampling control loop.
pub struct AdaptiveSampler<'a, C: Clock + ?Sized> {
    config: &'a SamplerConfig,
    clock: &'a C,
}

impl<'a, C: Clock + ?Sized> AdaptiveSampler<'a, C> {
    pub fn new(config: &'a SamplerConfig, clock: &'a C) -> Self {
        Self { config, clock }
    }

    /// Measure `inner` until the estimate converges or the budget runs out.
    ///
    /// `bytes` is the number of bytes one call processes, used for throughput.
    ///
    /// # Errors
    ///
    /// Only fails if the configuration is unusable (zero samples or a
    /// winsorizing band outside `[0, 100]`).
    pub fn run<T, F>(&self, inner: &mut F, bytes: Option<u64>) -> Result<SamplerReport, StatsError>
    where
        F: FnMut() -> T,
    {
        let mut state = BenchRunState::new(bytes);
        self.calibrate(&mut state, inner);

        let mut samples = vec![0.0_f64; self.config.samples];
        loop {
            let round_start = self.clock.now();

            let n = state.n;
            let summ = self.sample_phase(&mut state, n, &mut samples, inner)?;
            let long_batch = n.saturating_mul(self.config.long_batch_factor);
            let summ5 = self.sample_phase(&mut state, long_batch, &mut samples, inner)?;

            let round_ns = self
                .clock
                .ticks_to_ns(self.clock.now().saturating_sub(round_start));
            state.rounds += 1;

            debug!(
                round = state.rounds,
                n = state.n,
                round_ns,
                median = summ.median,
                median5 = summ5.median,
                mad_pct = summ.median_abs_dev_pct,
                "sampling round finished"
            );

            match evaluate(self.config, round_ns, &summ, &summ5, &state) {
                Decision::Continue { next_batch } => state.n = next_batch,
                Decision::Stop(reason) => {
                    match reason {
                        StopReason::Converged => info!(
                            rounds = state.rounds,
                            median_ns = summ5.median,
                            "sampling converged"
                        ),
                        StopReason::TimedOut => warn!(
                            rounds = state.rounds,
                            total_ns = state.total_ns,
                            "time budget exhausted before convergence"
                        ),
                        StopReason::OverflowStopped => warn!(
                            n = state.n,
                            "batch size cannot grow further, stopping"
                        ),
                    }
                    return Ok(SamplerReport {
                        summary: summ5,
                        reason,
                        total_ns: state.total_ns,
                        total_iterations: state.total_iterations,
                        bytes: state.bytes,
                        rounds: state.rounds,
                        final_batch: state.n,
                    });
                }
            }
        }
    }

    /// Run one call and derive the initial batch size from its cost.
    fn calibrate<T, F>(&self, state: &mut BenchRunState, inner: &mut F)
    where
        F: FnMut() -> T,
    {
        let mut bencher = Bencher::new(self.clock);
        bencher.bench_n(1, inner);
        state.last_elapsed_ticks = bencher.elapsed_ticks();
        state.record(1, bencher.ns_elapsed());

        let dpi = bencher.ns_per_iter();
        state.n = if dpi > 0 {
            (self.config.target_batch_ns / dpi).max(1)
        } else {
            self.config.target_batch_ns
        };

        debug!(ns_per_iter = dpi, n = state.n, "calibrated batch size");
    }

    /// Measure `samples.len()` batches of `batch` iterations, winsorize the
    /// per-iteration costs and summarize them.
    fn sample_phase<T, F>(
        &self,
        state: &mut BenchRunState,
        batch: u64,
        samples: &mut [f64],
        inner: &mut F,
    ) -> Result<Summary, StatsError>
    where
        F: FnMut() -> T,
    {
        let mut bencher = Bencher::new(self.clock);
        let phase_start = self.clock.now();

        for sample in samples.iter_mut() {
            bencher.bench_n(batch, inner);
            *sample = bencher.ns_per_iter() as f64;
        }

        let phase_ns = self
            .clock
            .ticks_to_ns(self.clock.now().saturating_sub(phase_start));
        state.last_elapsed_ticks = bencher.elapsed_ticks();
        state.record(batch.saturating_mul(samples.len() as u64), phase_ns);

        winsorize(samples, self.config.winsorize_pct)?;
        Summary::new(samples)
    }
}

/// Decide whether a round ends the run.
fn evaluate(
    config: &SamplerConfig,
    round_ns: u64,
    summ: &Summary,
    summ5: &Summary,
    state: &BenchRunState,
) -> Decision {
    let round_long_enough = round_ns > saturating_ns(config.min_round);
    let stable = summ.median_abs_dev_pct < config.max_mad_pct;
    let phases_agree = (summ.median - summ5.median).abs() <= summ5.median_abs_dev;

    if round_long_enough && stable && phases_agree {
        return Decision::Stop(StopReason::Converged);
    }

    if state.total_ns > saturating_ns(config.time_budget) {
        return Decision::Stop(StopReason::TimedOut);
    }

    // the next round runs a long batch of 2n * long_batch_factor
    let growth = config.long_batch_factor.saturating_mul(2).max(10);
    match state.n.checked_mul(growth) {
        Some(_) => Decision::Continue {
            next_batch: state.n * 2,
        },
        None => Decision::Stop(StopReason::OverflowStopped),
    }
}

fn saturating_ns(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
