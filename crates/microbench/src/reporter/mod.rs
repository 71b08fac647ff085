//! Benchmark result reporting
//!
//! This module handles formatting and outputting benchmark results as JSON or
//! as a human-readable console table.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable `{"BenchmarksResults": [...]}` document
//! - **Console**: Fixed-width table with auto-scaled time units
//!
//! # Example
//!
//! ```no_run
//! use microbench::reporter::{Reporter, OutputFormat};
//! use microbench::runner::BenchmarksResults;
//!
//! # fn example(results: BenchmarksResults) -> anyhow::Result<()> {
//! let reporter = Reporter::new(OutputFormat::Console);
//! reporter.report(&results)?;
//!
//! // Or write to a file
//! Reporter::new(OutputFormat::Json)
//!     .write_to_file(&results, "results.json")?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::runner::BenchmarksResults;

pub use console::{format_duration, ConsoleReporter};
pub use json::JsonReporter;

/// Output format for benchmark results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console table
    #[default]
    Console,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "json_pretty" => Ok(OutputFormat::JsonPretty),
            "console" => Ok(OutputFormat::Console),
            other => Err(format!(
                "unknown output format '{}', expected console, json or json-pretty",
                other
            )),
        }
    }
}

/// Reporter for benchmark results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, results: &BenchmarksResults) -> Result<()> {
        let output = self.format_results(results)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Write results to a file
    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        results: &BenchmarksResults,
        path: P,
    ) -> Result<()> {
        let output = self.format_results(results)?;
        fs::write(path, output)?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_results(&self, results: &BenchmarksResults) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(results, false),
            OutputFormat::JsonPretty => JsonReporter::format(results, true),
            OutputFormat::Console => ConsoleReporter::format(results),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::runner::{BenchSamples, BenchmarksResults};
    use crate::stats::Summary;

    pub fn create_test_results() -> BenchmarksResults {
        BenchmarksResults {
            benchmarks: vec![
                BenchSamples {
                    name: "sort_1k".to_string(),
                    total_ns: 2_350_000_000,
                    total_iterations: 1_200_001,
                    mb_s: 0,
                    ns_iter_summ: Summary::new(&[1_850.0, 1_900.0, 1_950.0]).unwrap(),
                },
                BenchSamples {
                    name: "checked_add".to_string(),
                    total_ns: 310_000_000,
                    total_iterations: 300_000_001,
                    mb_s: 8_000,
                    ns_iter_summ: Summary::new(&[0.5, 1.0, 1.5]).unwrap(),
                },
            ],
        }
    }
}
