//! Opaque consumption of measured results
//!
//! Every value produced by a measured operation is routed through
//! [`black_box`]. The optimizer must assume the value is read, so no call can
//! be proven dead and removed from a batch. Without it a batch of `n` calls to
//! a pure function may compile down to nothing and still report a time.

/// Consume `value` opaquely and hand it back.
///
/// Delegates to [`std::hint::black_box`].
///
/// # Examples
///
/// ```
/// use microbench::black_box;
///
/// let x = black_box(2 + 2);
/// assert_eq!(x, 4);
/// ```
#[inline]
pub fn black_box<T>(value: T) -> T {
    std::hint::black_box(value)
}
