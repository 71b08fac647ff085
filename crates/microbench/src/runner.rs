//! Benchmark execution orchestration
//!
//! This module drives every registered benchmark through the adaptive
//! sampler, one after another on the calling thread, and collects the
//! results in registration order.
//!
//! # Example
//!
//! ```no_run
//! use microbench::config::SamplerConfig;
//! use microbench::registry::Registry;
//! use microbench::runner::BenchmarkRunner;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut registry = Registry::new();
//! registry.register("format_u64", || format!("{}", 1234567_u64));
//!
//! let runner = BenchmarkRunner::new(SamplerConfig::default()).with_filter("format")?;
//! let results = runner.run(&mut registry)?;
//!
//! for bench in &results.benchmarks {
//!     println!("{}: {:.1} ns/iter", bench.name, bench.ns_iter_summ.median);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument};

use crate::clock::{Clock, MonotonicClock};
use crate::config::{Config, SamplerConfig};
use crate::registry::{Benchmark, Registry};
use crate::sampler::{AdaptiveSampler, SamplerReport};
use crate::stats::Summary;

/// Results for a single benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSamples {
    /// Name of the benchmark
    pub name: String,
    /// Measured time across all phases in nanoseconds
    pub total_ns: u64,
    /// Iterations executed across all phases
    pub total_iterations: u64,
    /// Throughput in MB/s, 0 when no byte count was declared
    pub mb_s: u64,
    /// Per-iteration statistics in nanoseconds
    pub ns_iter_summ: Summary,
}

impl BenchSamples {
    pub fn from_report(name: impl Into<String>, report: &SamplerReport) -> Self {
        Self {
            name: name.into(),
            total_ns: report.total_ns,
            total_iterations: report.total_iterations,
            mb_s: report.mb_s(),
            ns_iter_summ: report.summary,
        }
    }
}

/// Results from a complete benchmark run, in registration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarksResults {
    #[serde(rename = "BenchmarksResults")]
    pub benchmarks: Vec<BenchSamples>,
}

/// The benchmark runner
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: SamplerConfig,
    filter: Option<Regex>,
}

impl BenchmarkRunner {
    /// Create a runner that measures every registered benchmark
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            filter: None,
        }
    }

    /// Create a runner from a full configuration, including its name filter
    pub fn from_config(config: &Config) -> Result<Self> {
        let runner = Self::new(config.sampler.clone());
        match &config.report.filter {
            Some(pattern) => runner.with_filter(pattern),
            None => Ok(runner),
        }
    }

    /// Only run benchmarks whose name matches `pattern`
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression
    pub fn with_filter(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid benchmark filter: {}", pattern))?;
        self.filter = Some(regex);
        Ok(self)
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Whether a benchmark name passes the filter
    pub fn selects(&self, name: &str) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(name))
    }

    /// Run the selected benchmarks against the wall clock
    pub fn run(&self, registry: &mut Registry) -> Result<BenchmarksResults> {
        self.run_with_clock(registry, &MonotonicClock::new())
    }

    /// Run the selected benchmarks against `clock`
    #[instrument(skip_all, fields(registered = registry.len()))]
    pub fn run_with_clock<C: Clock + ?Sized>(
        &self,
        registry: &mut Registry,
        clock: &C,
    ) -> Result<BenchmarksResults> {
        let start_time = Instant::now();
        let mut benchmarks = Vec::new();

        for bench in registry.iter_mut() {
            if !self.selects(bench.name()) {
                continue;
            }
            benchmarks.push(self.run_benchmark(bench, clock)?);
        }

        info!(
            "Ran {} benchmarks in {}ms",
            benchmarks.len(),
            start_time.elapsed().as_millis()
        );

        Ok(BenchmarksResults { benchmarks })
    }

    /// Run a single benchmark
    #[instrument(skip(self, bench, clock), fields(bench = %bench.name()))]
    fn run_benchmark<C: Clock + ?Sized>(
        &self,
        bench: &mut Benchmark,
        clock: &C,
    ) -> Result<BenchSamples> {
        info!("Running benchmark: {}", bench.name());

        let sampler = AdaptiveSampler::new(&self.config, clock);
        let bytes = bench.bytes();
        let name = bench.name().to_string();
        let mut routine = bench.routine_mut();

        let report = sampler
            .run(&mut routine, bytes)
            .with_context(|| format!("Sampling failed for benchmark '{}'", name))?;

        info!(
            reason = ?report.reason,
            rounds = report.rounds,
            median_ns = report.summary.median,
            "Benchmark '{}' finished",
            name
        );

        Ok(BenchSamples::from_report(name, &report))
    }
}
