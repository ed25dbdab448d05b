//! Common utilities used across the crate.
//!
//! This module provides the floating-point closeness checks that every
//! bin-edge comparison goes through, so the spacing classifier and the
//! edge comparator agree on what "equal" means.

// =============================================================================
// Closeness
// =============================================================================

/// Absolute floor added to every relative comparison.
///
/// Keeps comparisons of values at or near zero (e.g. a `0.0` edge produced
/// by `linspace(-1, 1, 3)`) from failing on rounding noise.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Check whether `a` is close to the reference value `b`.
///
/// `|a - b| <= atol + rtol * |b|`. The relative term scales with the
/// reference, so the check is not strictly symmetric for large `rtol`.
/// NaN is never close to anything.
#[inline]
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}

/// Check whether every value is close to a single reference value.
#[inline]
pub fn all_close_to<I>(values: I, reference: f64, rtol: f64) -> bool
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .all(|v| is_close(v, reference, rtol, DEFAULT_ATOL))
}

/// Check pairwise closeness of two equally long sequences.
///
/// Elements of `b` act as reference values. Extra elements in the longer
/// sequence are ignored; callers compare lengths first.
#[inline]
pub fn all_close_pairwise<I, J>(a: I, b: J, rtol: f64) -> bool
where
    I: IntoIterator<Item = f64>,
    J: IntoIterator<Item = f64>,
{
    a.into_iter()
        .zip(b)
        .all(|(x, y)| is_close(x, y, rtol, DEFAULT_ATOL))
}
