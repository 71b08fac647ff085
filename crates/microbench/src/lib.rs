//! Adaptive micro-benchmarking harness
//!
//! This crate measures the per-call cost of a zero-argument operation. It
//! picks batch sizes adaptively, re-measuring with growing batches until the
//! estimate is stable or a time budget is spent, and summarizes the samples
//! with robust estimators (median, MAD, quartiles).
//!
//! # Features
//!
//! - **Robust statistics**: Exact summation, NaN-aware ordering, interpolated
//!   percentiles, winsorizing and median absolute deviation
//! - **Adaptive sampling**: Calibrated batch sizes, a stability criterion and a
//!   bounded time budget
//! - **Registry**: Benchmarks registered at runtime and filtered by regex
//! - **Multiple Output Formats**: JSON and a console table
//!
//! # Example
//!
//! ```no_run
//! use microbench::{Config, Registry, runner::BenchmarkRunner, reporter::{Reporter, OutputFormat}};
//!
//! # fn example() -> anyhow::Result<()> {
//! // Load configuration
//! let config = Config::from_file("microbench.toml")?;
//!
//! // Register the operations to measure
//! let mut registry = Registry::new();
//! registry.register("parse_u64", || "18446744073709551615".parse::<u64>());
//!
//! // Run them and report the results
//! let runner = BenchmarkRunner::from_config(&config)?;
//! let results = runner.run(&mut registry)?;
//! Reporter::new(OutputFormat::Console).report(&results)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The sampler is configured using TOML files; every key is optional:
//!
//! ```toml
//! [sampler]
//! samples = 50
//! winsorize_pct = 5.0
//! target_batch_ns = 1000000
//! long_batch_factor = 5
//! min_round_ms = 100
//! max_mad_pct = 1.0
//! time_budget_ms = 3000
//!
//! [report]
//! format = "console"
//! filter = "^parse_"
//! ```

pub mod bencher;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod sampler;
pub mod sink;
pub mod stats;

// Re-export main types for convenience
pub use config::Config;
pub use error::StatsError;
pub use registry::Registry;
pub use reporter::{OutputFormat, Reporter};
pub use runner::{BenchSamples, BenchmarkRunner, BenchmarksResults};
pub use sampler::{AdaptiveSampler, SamplerReport, StopReason};
pub use sink::black_box;
pub use stats::Summary;
