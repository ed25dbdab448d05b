//! Shared helpers for integration tests.
//!
//! For assertion helpers, use `binmaps::testing`.

#![allow(dead_code)]

use binmaps::{BinEdges, Map};
use ndarray::{Array1, Array2};

#[allow(unused_imports)]
pub use binmaps::testing::{assert_edges_approx_eq, assert_slice_approx_eq, DEFAULT_TOLERANCE};

// =============================================================================
// Edge Builders
// =============================================================================

/// Validated edges from a literal slice.
pub fn edges(values: &[f64]) -> BinEdges {
    BinEdges::new(values.to_vec()).unwrap_or_else(|e| panic!("bad test edges {values:?}: {e}"))
}

/// `n_bins` equal-width bins over `[lo, hi]`.
pub fn linear_edges(lo: f64, hi: f64, n_bins: usize) -> BinEdges {
    BinEdges::from_array(Array1::linspace(lo, hi, n_bins + 1)).unwrap()
}

/// `n_bins` log-spaced bins over `[10^lo_exp, 10^hi_exp]`.
pub fn log_edges(lo_exp: f64, hi_exp: f64, n_bins: usize) -> BinEdges {
    BinEdges::from_array(Array1::logspace(10.0, lo_exp, hi_exp, n_bins + 1)).unwrap()
}

/// 2D map whose value at `(i, j)` is `i * n_cols + j`.
pub fn counting_map(edges1: BinEdges, edges2: BinEdges) -> Map {
    let n_cols = edges2.n_bins();
    let values = Array2::from_shape_fn((edges1.n_bins(), n_cols), |(i, j)| (i * n_cols + j) as f64);
    Map::new_2d(edges1, edges2, values).unwrap()
}
