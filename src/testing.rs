//! Testing utilities for binmaps.
//!
//! Assertion helpers shared by unit tests and integration tests.
//!
//! ```ignore
//! use binmaps::testing::{assert_edges_approx_eq, DEFAULT_TOLERANCE};
//! ```

use approx::relative_eq;

use crate::binning::BinEdges;

// =============================================================================
// Constants
// =============================================================================

/// Default relative tolerance for comparing generated edges.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

// =============================================================================
// Slice Assertions
// =============================================================================

/// Format differing elements of two slices for an assertion message.
pub fn format_slice_diff(actual: &[f64], expected: &[f64], tolerance: f64) -> String {
    let mut out = String::new();
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if !relative_eq!(*a, *e, epsilon = tolerance, max_relative = tolerance) {
            out.push_str(&format!(
                "[{i:3}] - {e:>14.8}  (expected)\n      + {a:>14.8}  (actual, Δ={:+.2e})\n",
                a - e
            ));
        }
    }
    out
}

/// Assert that two slices are equal element-wise within a relative tolerance.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance,
/// showing a diff of the offending elements.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    let diff = format_slice_diff(actual, expected, tolerance);
    assert!(diff.is_empty(), "{context}: values differ\n{diff}");
}

/// Assert that bin edges match the expected values.
pub fn assert_edges_approx_eq(actual: &BinEdges, expected: &[f64], tolerance: f64) {
    assert_slice_approx_eq(actual, expected, tolerance, "bin edges");
}
