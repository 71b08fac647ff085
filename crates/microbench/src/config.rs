//! Configuration parsing for the adaptive sampler
//!
//! This module provides TOML-based configuration for the sampler's tunables
//! (sample count, winsorizing band, convergence thresholds and time budget)
//! and for how results are reported. Every field has a default, so an empty
//! file is a valid configuration.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::reporter::OutputFormat;

/// Main configuration structure loaded from TOML files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Adaptive sampler tunables
    #[serde(default)]
    pub sampler: SamplerConfig,
    /// Output settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - A value is out of range (see [`Config::validate`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use microbench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config::from_file("microbench.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use microbench::config::Config;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     [sampler]
    ///     samples = 30
    ///     time_budget_ms = 1000
    /// "#;
    /// let config = Config::from_str(toml)?;
    /// assert_eq!(config.sampler.samples, 30);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is within its usable range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.sampler.validate().context("Invalid [sampler] section")
    }
}

/// Tunables of the adaptive sampling loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Batches measured per sample phase (default: 50)
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Percentile band clamped on each side before summarizing (default: 5.0)
    #[serde(default = "default_winsorize_pct")]
    pub winsorize_pct: f64,
    /// Calibration target for the duration of one batch (default: 1ms)
    #[serde(default = "default_target_batch_ns")]
    pub target_batch_ns: u64,
    /// Batch multiplier of the second sample phase (default: 5)
    #[serde(default = "default_long_batch_factor")]
    pub long_batch_factor: u64,
    /// A round must take longer than this to count as converged (default: 100ms)
    #[serde(default = "default_min_round", with = "duration_ms", rename = "min_round_ms")]
    pub min_round: Duration,
    /// Largest MAD, as a percentage of the median, accepted as stable (default: 1.0)
    #[serde(default = "default_max_mad_pct")]
    pub max_mad_pct: f64,
    /// Cumulative measurement time after which sampling gives up (default: 3s)
    #[serde(default = "default_time_budget", with = "duration_ms", rename = "time_budget_ms")]
    pub time_budget: Duration,
}

impl SamplerConfig {
    fn validate(&self) -> anyhow::Result<()> {
        if self.samples == 0 {
            bail!("samples must be at least 1");
        }
        if !(0.0..50.0).contains(&self.winsorize_pct) {
            bail!(
                "winsorize_pct must be in [0, 50), got {}",
                self.winsorize_pct
            );
        }
        if self.target_batch_ns == 0 {
            bail!("target_batch_ns must be positive");
        }
        if self.long_batch_factor == 0 {
            bail!("long_batch_factor must be positive");
        }
        if self.max_mad_pct.is_nan() || self.max_mad_pct <= 0.0 {
            bail!("max_mad_pct must be positive, got {}", self.max_mad_pct);
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            winsorize_pct: default_winsorize_pct(),
            target_batch_ns: default_target_batch_ns(),
            long_batch_factor: default_long_batch_factor(),
            min_round: default_min_round(),
            max_mad_pct: default_max_mad_pct(),
            time_budget: default_time_budget(),
        }
    }
}

fn default_samples() -> usize {
    50
}

fn default_winsorize_pct() -> f64 {
    5.0
}

fn default_target_batch_ns() -> u64 {
    1_000_000
}

fn default_long_batch_factor() -> u64 {
    5
}

fn default_min_round() -> Duration {
    Duration::from_millis(100)
}

fn default_max_mad_pct() -> f64 {
    1.0
}

fn default_time_budget() -> Duration {
    Duration::from_secs(3)
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format (default: console)
    #[serde(default)]
    pub format: OutputFormat,
    /// Regex selecting which benchmarks to run; all when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Serde module for serializing/deserializing Duration as milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}
