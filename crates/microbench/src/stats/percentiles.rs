//! Percentile calculations over sample sets.
//!
//! Percentiles use linear interpolation between the two closest ranks. NaN
//! samples sort after every finite value, see [`cmp_nan_last`].
//!
//! [`cmp_nan_last`]: super::numeric::cmp_nan_last

use super::numeric::sort_samples;
use crate::error::StatsError;

/// Calculate a percentile of already-sorted samples.
///
/// # Arguments
///
/// * `sorted` - Samples sorted ascending
/// * `p` - Percentile to calculate (0.0 to 100.0)
///
/// # Errors
///
/// * [`StatsError::InvalidInput`] - If `sorted` is empty
/// * [`StatsError::InvalidArgument`] - If `p` is outside `[0, 100]`
///
/// # Examples
///
/// ```
/// use microbench::stats::percentiles::percentile_of_sorted;
///
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile_of_sorted(&data, 50.0), Ok(2.5));
/// ```
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Result<f64, StatsError> {
    if sorted.is_empty() {
        return Err(StatsError::InvalidInput);
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(StatsError::InvalidArgument(p));
    }

    let last = sorted.len() - 1;
    if last == 0 {
        return Ok(sorted[0]);
    }
    if p == 100.0 {
        return Ok(sorted[last]);
    }

    let rank = (p / 100.0) * last as f64;
    let lower_rank = rank.floor();
    let fraction = rank - lower_rank;
    let lower_index = lower_rank as usize;
    // p just below 100 can round up to the last rank
    if lower_index >= last {
        return Ok(sorted[last]);
    }

    let lower_value = sorted[lower_index];
    let upper_value = sorted[lower_index + 1];
    Ok(lower_value + (upper_value - lower_value) * fraction)
}

/// Calculate a percentile of unsorted samples.
///
/// Sorts a copy of `samples` and defers to [`percentile_of_sorted`].
///
/// # Examples
///
/// ```
/// use microbench::stats::percentiles::percentile;
///
/// let data = vec![5.0, 1.0, 4.0, 2.0, 3.0];
/// assert_eq!(percentile(&data, 50.0), Ok(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Result<f64, StatsError> {
    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    percentile_of_sorted(&sorted, p)
}
