//! Outlier suppression for benchmark samples.
//!
//! Samples are winsorized rather than discarded: values beyond a percentile
//! band are clamped to the band's edges, so the sample count stays fixed while
//! scheduler spikes stop dominating the spread estimators.

use super::numeric::sort_samples;
use super::percentiles::percentile_of_sorted;
use crate::error::StatsError;

/// Clamp samples into the `[pct, 100 - pct]` percentile band in place.
///
/// Both band edges are taken from a sorted copy of the original samples.
/// Positions and count are unchanged. An empty slice is left untouched.
///
/// # Errors
///
/// Returns [`StatsError::InvalidArgument`] if `pct` is outside `[0, 100]`.
///
/// # Examples
///
/// ```
/// use microbench::stats::outliers::winsorize;
///
/// let mut data = vec![1.0, 2.0, 3.0, 4.0, 100.0];
/// winsorize(&mut data, 25.0).unwrap();
/// assert_eq!(data, vec![2.0, 2.0, 3.0, 4.0, 4.0]);
/// ```
pub fn winsorize(samples: &mut [f64], pct: f64) -> Result<(), StatsError> {
    if samples.is_empty() {
        return Ok(());
    }

    let mut sorted = samples.to_vec();
    sort_samples(&mut sorted);
    let lo = percentile_of_sorted(&sorted, pct)?;
    let hi = percentile_of_sorted(&sorted, 100.0 - pct)?;

    for sample in samples.iter_mut() {
        if *sample > hi {
            *sample = hi;
        } else if *sample < lo {
            *sample = lo;
        }
    }

    Ok(())
}
