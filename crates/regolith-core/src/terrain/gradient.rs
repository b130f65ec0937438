//! Finite-difference helpers shared by the slope stage.
//! `pub(crate)` only.

/// Derivative of `sample` at position `i` along an axis of `n` cells spaced
/// `spacing` metres apart.
///
/// Interior cells use the centred difference `(z[i+1] − z[i−1]) / 2h`; the
/// first and last cells fall back to one-sided differences. An axis with
/// fewer than two cells has no slope along it and returns `0.0`.
#[inline]
pub(crate) fn axis_derivative(sample: impl Fn(usize) -> f64, i: usize, n: usize, spacing: f64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    if i == 0 {
        (sample(1) - sample(0)) / spacing
    } else if i == n - 1 {
        (sample(n - 1) - sample(n - 2)) / spacing
    } else {
        (sample(i + 1) - sample(i - 1)) / (2.0 * spacing)
    }
}
