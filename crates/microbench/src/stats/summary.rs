//! Descriptive statistics over a sample set.

use serde::{Deserialize, Serialize};

use super::numeric::{precise_sum, sort_samples};
use super::percentiles::percentile_of_sorted;
use crate::error::StatsError;

/// Scale factor making MAD a consistent estimator of the standard deviation
/// for normally distributed samples.
pub const MAD_SCALE: f64 = 1.4826;

/// Statistical summary of a sample set.
///
/// Computed once by [`Summary::new`] and never mutated. For NaN-free input
/// `min <= quartiles.0 <= median <= quartiles.2 <= max` and `variance >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample variance (Bessel-corrected)
    #[serde(rename = "var")]
    pub variance: f64,
    pub std_dev: f64,
    /// Standard deviation as a percentage of the mean
    pub std_dev_pct: f64,
    /// Median absolute deviation, scaled by [`MAD_SCALE`]
    pub median_abs_dev: f64,
    /// MAD as a percentage of the median
    pub median_abs_dev_pct: f64,
    /// 25th, 50th and 75th percentiles
    pub quartiles: (f64, f64, f64),
    /// Interquartile range (q3 - q1)
    pub iqr: f64,
}

impl Summary {
    /// Compute summary statistics from samples.
    ///
    /// The samples may be in any order and may contain NaN.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidInput`] if `samples` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use microbench::stats::Summary;
    ///
    /// let summary = Summary::new(&[958.0, 924.0]).unwrap();
    /// assert_eq!(summary.median, 941.0);
    /// assert_eq!(summary.variance, 578.0);
    /// assert_eq!(summary.quartiles, (932.5, 941.0, 949.5));
    /// ```
    pub fn new(samples: &[f64]) -> Result<Self, StatsError> {
        if samples.is_empty() {
            return Err(StatsError::InvalidInput);
        }

        let count = samples.len() as f64;
        let sum = precise_sum(samples);
        let min = samples.iter().fold(samples[0], |acc, &x| acc.min(x));
        let max = samples.iter().fold(samples[0], |acc, &x| acc.max(x));
        let mean = sum / count;

        let mut sorted = samples.to_vec();
        sort_samples(&mut sorted);
        let q1 = percentile_of_sorted(&sorted, 25.0)?;
        let median = percentile_of_sorted(&sorted, 50.0)?;
        let q3 = percentile_of_sorted(&sorted, 75.0)?;

        let variance = if samples.len() < 2 {
            0.0
        } else {
            let squared_diffs = samples.iter().fold(0.0, |acc, &x| {
                let diff = x - mean;
                acc + diff * diff
            });
            squared_diffs / (count - 1.0)
        };
        let std_dev = variance.sqrt();

        let mut deviations: Vec<f64> = samples.iter().map(|&x| (x - median).abs()).collect();
        sort_samples(&mut deviations);
        let median_abs_dev = percentile_of_sorted(&deviations, 50.0)? * MAD_SCALE;

        Ok(Summary {
            sum,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
            std_dev_pct: (std_dev / mean) * 100.0,
            median_abs_dev,
            median_abs_dev_pct: (median_abs_dev / median) * 100.0,
            quartiles: (q1, median, q3),
            iqr: q3 - q1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::new(&[]), Err(StatsError::InvalidInput));
    }

    #[test]
    fn test_summary_two_samples() {
        let summary = Summary::new(&[958.0, 924.0]).unwrap();

        assert_eq!(summary.sum, 1882.0);
        assert_eq!(summary.min, 924.0);
        assert_eq!(summary.max, 958.0);
        assert_eq!(summary.mean, 941.0);
        assert_eq!(summary.median, 941.0);
        assert_eq!(summary.variance, 578.0);
        assert_close(summary.std_dev, 24.04163);
        assert_close(summary.std_dev_pct, 2.55490);
        assert_close(summary.median_abs_dev, 25.2042);
        assert_close(summary.median_abs_dev_pct, 2.67845);
        assert_eq!(summary.quartiles, (932.5, 941.0, 949.5));
        assert_eq!(summary.iqr, 17.0);
    }

    #[test]
    fn test_summary_single_sample() {
        let summary = Summary::new(&[42.0]).unwrap();

        assert_eq!(summary.sum, 42.0);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.median_abs_dev, 0.0);
        assert_eq!(summary.quartiles, (42.0, 42.0, 42.0));
        assert_eq!(summary.iqr, 0.0);
    }

    #[test]
    fn test_summary_ignores_nan_for_extrema() {
        let summary = Summary::new(&[1.0, 2.0, f64::NAN, 4.0, 3.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_summary_leading_nan_extrema() {
        let summary = Summary::new(&[f64::NAN, 7.0, 3.0]).unwrap();
        assert_eq!(summary.min, 3.0);
        assert_eq!(summary.max, 7.0);
    }

    #[test]
    fn test_summary_all_nan() {
        let summary = Summary::new(&[f64::NAN, f64::NAN]).unwrap();
        assert!(summary.min.is_nan());
        assert!(summary.max.is_nan());
        assert!(summary.median.is_nan());
    }

    #[test]
    fn test_summary_is_deterministic() {
        let samples = [3.5, f64::NAN, 1.25, 9.0, 2.0, 1e12, -4.0];
        let a = Summary::new(&samples).unwrap();
        let b = Summary::new(&samples).unwrap();

        assert_eq!(a.sum.to_bits(), b.sum.to_bits());
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.median.to_bits(), b.median.to_bits());
        assert_eq!(a.median_abs_dev.to_bits(), b.median_abs_dev.to_bits());
        assert_eq!(a.quartiles.0.to_bits(), b.quartiles.0.to_bits());
        assert_eq!(a.quartiles.2.to_bits(), b.quartiles.2.to_bits());
        assert_eq!(a.iqr.to_bits(), b.iqr.to_bits());
    }

    #[test]
    fn test_summary_mean_and_std_dev() {
        let samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = Summary::new(&samples).unwrap();

        assert_eq!(summary.mean, 5.0);

        // squared deviations sum to 32 over 7 degrees of freedom
        let expected_std_dev = (32.0_f64 / 7.0).sqrt();
        assert!((summary.std_dev - expected_std_dev).abs() < 1e-10);
    }

    #[test]
    fn test_summary_mad_robust_to_outlier() {
        let samples = vec![10.0, 10.0, 11.0, 9.0, 10.0, 1_000.0];
        let summary = Summary::new(&samples).unwrap();

        assert_eq!(summary.median, 10.0);
        // deviations: [0, 0, 1, 1, 0, 990] -> median 0.5
        assert_eq!(summary.median_abs_dev, 0.5 * MAD_SCALE);
        assert!(summary.std_dev > 100.0);
    }

    #[test]
    fn test_summary_extreme_magnitudes() {
        let summary = Summary::new(&[1e30, 1.2, -1e30]).unwrap();
        assert_eq!(summary.sum, 1.2);
    }
}
