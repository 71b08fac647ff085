//! Integration tests for the adaptive sampling loop
//!
//! Most scenarios run on a [`ManualClock`] that the measured operation
//! advances by a fixed cost, so the outcome of every round is exact.

#[path = "common/fixed_cost.rs"]
mod fixed_cost;

use fixed_cost::{register_fixed, shared_clock};
use microbench::clock::{Clock, ManualClock, MonotonicClock};
use microbench::config::SamplerConfig;
use microbench::{AdaptiveSampler, BenchmarkRunner, Registry, StopReason};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Nanoseconds spent in one round of `batch`: 50 short and 50 long batches
fn round_ns(config: &SamplerConfig, batch: u64, cost: u64) -> u64 {
    let samples = config.samples as u64;
    samples * batch * cost + samples * batch * config.long_batch_factor * cost
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_fixed_cost_converges_in_one_round() {
    let config = SamplerConfig::default();

    for cost in [3_u64, 250, 1_000, 70_000, 2_000_000] {
        let clock = ManualClock::new();
        let sampler = AdaptiveSampler::new(&config, &clock);
        let report = sampler.run(&mut || clock.advance(cost), None).unwrap();

        assert_eq!(report.reason, StopReason::Converged, "cost {}", cost);
        assert_eq!(report.rounds, 1, "cost {}", cost);
        assert_eq!(report.summary.median, cost as f64);
        assert_eq!(report.summary.median_abs_dev, 0.0);

        let n = (config.target_batch_ns / cost).max(1);
        assert_eq!(report.final_batch, n);
        assert_eq!(report.total_iterations, 1 + 50 * n + 250 * n);
        assert_eq!(report.total_ns, cost + round_ns(&config, n, cost));
    }
}

#[test]
fn test_ticks_are_converted_to_nanoseconds() {
    let config = SamplerConfig::default();
    let clock = ManualClock::with_ns_per_tick(10);
    let sampler = AdaptiveSampler::new(&config, &clock);

    // 100 ticks at 10ns per tick
    let report = sampler.run(&mut || clock.advance(100), None).unwrap();

    assert_eq!(report.reason, StopReason::Converged);
    assert_eq!(report.summary.median, 1_000.0);
    assert_eq!(report.final_batch, 1_000);
}

#[test]
fn test_throughput_from_converged_run() {
    let config = SamplerConfig::default();
    let clock = ManualClock::new();
    let sampler = AdaptiveSampler::new(&config, &clock);

    // 4 KiB in 500ns
    let report = sampler.run(&mut || clock.advance(500), Some(4096)).unwrap();

    assert_eq!(report.bytes, Some(4096));
    assert_eq!(report.mb_s(), 4096 * 1000 / 500);
}

// ============================================================================
// Time budget
// ============================================================================

#[test]
fn test_budget_is_exceeded_by_at_most_one_round() {
    let config = SamplerConfig {
        min_round: Duration::from_secs(600),
        ..SamplerConfig::default()
    };
    let budget = config.time_budget.as_nanos() as u64;

    for cost in [10_u64, 1_000, 400_000] {
        let clock = ManualClock::new();
        let sampler = AdaptiveSampler::new(&config, &clock);
        let report = sampler.run(&mut || clock.advance(cost), None).unwrap();

        assert_eq!(report.reason, StopReason::TimedOut, "cost {}", cost);
        assert!(report.total_ns > budget);

        let last_round = round_ns(&config, report.final_batch, cost);
        assert!(
            report.total_ns - last_round <= budget,
            "cost {}: {} ns spent before the final round",
            cost,
            report.total_ns - last_round
        );
    }
}

#[test]
fn test_batch_doubles_each_round() {
    let config = SamplerConfig {
        min_round: Duration::from_secs(600),
        ..SamplerConfig::default()
    };
    let clock = ManualClock::new();
    let sampler = AdaptiveSampler::new(&config, &clock);
    let report = sampler.run(&mut || clock.advance(1_000), None).unwrap();

    // 0.3s, 0.6s, 1.2s and 2.4s rounds cross the 3s budget on the fourth
    assert_eq!(report.rounds, 4);
    assert_eq!(report.final_batch, 1_000 << 3);
}

#[test]
fn test_wall_clock_run_stays_bounded() {
    init_tracing();
    let config = SamplerConfig {
        target_batch_ns: 100_000,
        min_round: Duration::from_millis(10),
        time_budget: Duration::from_millis(200),
        ..SamplerConfig::default()
    };
    let clock = MonotonicClock::new();
    let sampler = AdaptiveSampler::new(&config, &clock);

    let data: Vec<u64> = (0..64).collect();
    let report = sampler
        .run(&mut || data.iter().copied().sum::<u64>(), None)
        .unwrap();

    assert!(report.summary.median.is_finite());
    assert!(report.summary.median >= 0.0);
    assert!(report.total_iterations > 0);
    assert!(report.rounds >= 1);
    assert_ne!(report.reason, StopReason::OverflowStopped);
    assert!(clock.ticks_to_ns(clock.now()) >= report.total_ns);
}

// ============================================================================
// Runner
// ============================================================================

#[test]
fn test_runner_rejects_zero_samples() {
    let clock = shared_clock();
    let mut registry = Registry::new();
    register_fixed(&mut registry, &clock, "noop", 10, None);

    let runner = BenchmarkRunner::new(SamplerConfig {
        samples: 0,
        ..SamplerConfig::default()
    });
    let err = runner
        .run_with_clock(&mut registry, clock.as_ref())
        .unwrap_err();

    assert!(err.to_string().contains("noop"));
}
