//! Numeric helpers shared by the statistics engine and the sampler.
//!
//! Summation keeps a list of non-overlapping partial sums so that adding values
//! of wildly different magnitude never drops the small terms. Ordering treats
//! NaN as larger than every other value, which keeps sorts total and
//! deterministic for sample sets that contain NaN.

use std::cmp::Ordering;

use tracing::warn;

/// Sum `samples` exactly up to the final rounding.
///
/// Each incoming value is folded through the running partials with an
/// error-free two-sum; non-zero low parts are kept as new partials.
///
/// # Examples
///
/// ```
/// use microbench::stats::numeric::precise_sum;
///
/// assert_eq!(precise_sum(&[1e30, 1.2, -1e30]), 1.2);
/// ```
pub fn precise_sum(samples: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();

    for &sample in samples {
        let mut x = sample;
        let mut kept = 0;
        for i in 0..partials.len() {
            let mut y = partials[i];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        if kept >= partials.len() {
            partials.push(x);
        } else {
            partials[kept] = x;
            partials.truncate(kept + 1);
        }
    }

    partials.iter().fold(0.0, |acc, p| acc + p)
}

/// Total order over `f64` where NaN sorts after every other value.
///
/// Two NaNs compare equal, so a stable sort leaves them in input order.
pub fn cmp_nan_last(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

/// Sort samples ascending under [`cmp_nan_last`].
pub fn sort_samples(samples: &mut [f64]) {
    samples.sort_by(cmp_nan_last);
}

/// Add `delta` to a running counter, saturating at `u64::MAX` on overflow.
pub fn accumulate(total: u64, delta: u64, counter: &str) -> u64 {
    match total.checked_add(delta) {
        Some(sum) => sum,
        None => {
            warn!(counter, total, delta, "counter overflowed, saturating");
            u64::MAX
        }
    }
}
