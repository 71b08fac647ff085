//! Console reporter for benchmark results
//!
//! Renders one row per benchmark in a fixed-width ASCII table. Durations are
//! auto-scaled to the smallest unit under which they stay below 1000.

use anyhow::Result;
use std::fmt::Write;

use crate::runner::{BenchSamples, BenchmarksResults};

const UNITS: [(&str, f64); 4] = [
    ("ns", 1.0),
    ("us", 1_000.0),
    ("msec", 1_000_000.0),
    ("sec", 1_000_000_000.0),
];

const TIME_WIDTH: usize = 24;
const CELL_WIDTH: usize = 12;

/// Format a nanosecond duration with an auto-scaled unit.
///
/// # Examples
///
/// ```
/// use microbench::reporter::format_duration;
///
/// assert_eq!(format_duration(999.0), "999.00 ns");
/// assert_eq!(format_duration(1_500.0), "1.50 us");
/// assert_eq!(format_duration(2_500_000_000.0), "2.50 sec");
/// ```
pub fn format_duration(ns: f64) -> String {
    for (unit, scale) in UNITS {
        let value = ns / scale;
        if value.abs() < 1000.0 {
            return format!("{:.2} {}", value, unit);
        }
    }
    let (unit, scale) = UNITS[UNITS.len() - 1];
    format!("{:.2} {}", ns / scale, unit)
}

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format benchmark results for console output
    pub fn format(results: &BenchmarksResults) -> Result<String> {
        let mut output = String::new();

        let name_width = results
            .benchmarks
            .iter()
            .map(|b| b.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Benchmark".len());

        let rule = format!(
            "+-{}-+-{}-+-{}-+-{}-+-{}-+-{}-+",
            "-".repeat(name_width),
            "-".repeat(TIME_WIDTH),
            "-".repeat(CELL_WIDTH),
            "-".repeat(CELL_WIDTH),
            "-".repeat(CELL_WIDTH),
            "-".repeat(CELL_WIDTH)
        );

        writeln!(output)?;
        writeln!(output, "{}", rule)?;
        writeln!(
            output,
            "| {:<nw$} | {:^tw$} | {:^cw$} | {:^cw$} | {:^cw$} | {:^cw$} |",
            "Benchmark",
            "Time/iter",
            "Best",
            "Worst",
            "Total",
            "Iterations",
            nw = name_width,
            tw = TIME_WIDTH,
            cw = CELL_WIDTH
        )?;
        writeln!(output, "{}", rule)?;

        for bench in &results.benchmarks {
            Self::format_row(&mut output, bench, name_width)?;
        }

        writeln!(output, "{}", rule)?;
        writeln!(output, "{} benchmarks", results.benchmarks.len())?;
        writeln!(output)?;
        Ok(output)
    }

    fn format_row(output: &mut String, bench: &BenchSamples, name_width: usize) -> Result<()> {
        let summ = &bench.ns_iter_summ;
        let time_per_iter = format!(
            "{} ± {}",
            format_duration(summ.median),
            format_duration(summ.max - summ.min)
        );

        writeln!(
            output,
            "| {:<nw$} | {:>tw$} | {:>cw$} | {:>cw$} | {:>cw$} | {:>cw$} |",
            bench.name,
            time_per_iter,
            format_duration(summ.min),
            format_duration(summ.max),
            format_duration(bench.total_ns as f64),
            bench.total_iterations,
            nw = name_width,
            tw = TIME_WIDTH,
            cw = CELL_WIDTH
        )?;

        Ok(())
    }
}
