//! Microbench command line runner
//!
//! Runs the built-in benchmark suite through the adaptive sampler and prints
//! the results as a console table or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use microbench::{black_box, BenchmarkRunner, Config, OutputFormat, Registry, Reporter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "microbench")]
#[command(version, about = "Adaptive micro-benchmark runner")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: console, json or json-pretty (overrides the config file)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Only run benchmarks whose name matches this regex (overrides the config file)
    #[arg(long)]
    filter: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List registered benchmarks and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Reports go to stdout, so logs must stay on stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut registry = builtin_suite();

    if args.list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if let Some(filter) = args.filter {
        config.report.filter = Some(filter);
    }

    tracing::info!("Starting microbench v{}", env!("CARGO_PKG_VERSION"));

    let runner = BenchmarkRunner::from_config(&config)?;
    let results = runner.run(&mut registry)?;

    let reporter = Reporter::new(config.report.format);
    match &args.output {
        Some(path) => {
            reporter
                .write_to_file(&results, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => reporter.report(&results)?,
    }

    Ok(())
}

/// Benchmarks shipped with the runner
fn builtin_suite() -> Registry {
    let mut registry = Registry::new();

    let words: Vec<u64> = (0..1024).collect();
    registry.register_with_bytes("sum_u64_1k", 8 * 1024, move || {
        black_box(&words).iter().sum::<u64>()
    });

    let unsorted: Vec<u32> = (0..1000_u32)
        .map(|i| i.wrapping_mul(2_654_435_761) >> 7)
        .collect();
    registry.register("sort_u32_1k", move || {
        let mut v = black_box(&unsorted).clone();
        v.sort_unstable();
        v
    });

    registry.register("format_u64", || black_box(u64::MAX).to_string());

    registry.register("parse_u64", || black_box("18446744073709551615").parse::<u64>());

    registry.register("fib_20", || fib(black_box(20)));

    registry
}

fn fib(n: u32) -> u64 {
    match n {
        0 | 1 => u64::from(n),
        _ => fib(n - 1) + fib(n - 2),
    }
}
