//! Statistical analysis of benchmark samples
//!
//! This module provides the descriptive-statistics engine used by the sampler:
//! precise summation, NaN-aware ordering, percentiles, winsorizing and the
//! [`Summary`] of a sample set.
//!
//! # Examples
//!
//! ```
//! use microbench::stats::{winsorize, Summary};
//!
//! // Per-iteration timings with one scheduler spike
//! let mut samples = vec![10.0, 11.0, 10.5, 11.5, 12.0, 11.0, 150.0];
//!
//! // Clamp the tails before summarizing
//! winsorize(&mut samples, 5.0).unwrap();
//!
//! let summary = Summary::new(&samples).unwrap();
//! println!("Median: {}, MAD: {}", summary.median, summary.median_abs_dev);
//! ```

pub mod numeric;
pub mod outliers;
pub mod percentiles;
pub mod summary;

// Re-export main types and functions
pub use numeric::{accumulate, cmp_nan_last, precise_sum, sort_samples};
pub use outliers::winsorize;
pub use percentiles::{percentile, percentile_of_sorted};
pub use summary::{Summary, MAD_SCALE};
