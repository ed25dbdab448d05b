//! Spacing classification and conversions between edges and centers.

use std::iter;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::edges::BinEdges;
use super::SPACING_RTOL;
use crate::error::{BinningError, Result};
use crate::utils::all_close_to;

// ============================================================================
// Spacing
// ============================================================================

/// How the edges of a binning are distributed along the axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spacing {
    /// Equal widths.
    Linear,
    /// Equal ratios between consecutive edges (equal widths in log space).
    Logarithmic,
    /// Neither.
    Irregular,
}

impl Spacing {
    /// Classify a sequence, checking linear first.
    ///
    /// Sequences with fewer than three values are always [`Spacing::Linear`].
    pub fn of(values: &[f64], rtol: f64) -> Self {
        if is_linear(values, rtol) {
            Spacing::Linear
        } else if is_logarithmic(values, rtol) {
            Spacing::Logarithmic
        } else {
            Spacing::Irregular
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Check whether the values are evenly spaced on a linear scale.
///
/// A single bin (fewer than three values) counts as linear.
pub fn is_linear(values: &[f64], rtol: f64) -> bool {
    if values.len() < 3 {
        return true;
    }
    let first = values[1] - values[0];
    all_close_to(values.windows(2).map(|w| w[1] - w[0]), first, rtol)
}

/// Check whether the values are evenly spaced on a log scale.
///
/// Fewer than three values, or any value `<= 0`, is never logarithmic.
pub fn is_logarithmic(values: &[f64], rtol: f64) -> bool {
    if values.len() < 3 || values.iter().any(|&v| v <= 0.0) {
        return false;
    }
    let first = values[1] / values[0];
    all_close_to(values.windows(2).map(|w| w[1] / w[0]), first, rtol)
}

// ============================================================================
// Conversions
// ============================================================================

/// Bin centers for the given edges.
///
/// Logarithmic edges get geometric-mean centers, everything else gets
/// arithmetic means. Works for unequal widths.
pub fn centers_from_edges(edges: &[f64]) -> Array1<f64> {
    let lower = ArrayView1::from(&edges[..edges.len().saturating_sub(1)]);
    let upper = ArrayView1::from(&edges[edges.len().min(1)..]);
    if is_logarithmic(edges, SPACING_RTOL) {
        (&lower * &upper).mapv(f64::sqrt)
    } else {
        (&lower + &upper) / 2.0
    }
}

/// Reconstruct bin edges from bin centers.
///
/// Only centers evenly spaced in log or linear space can be converted; the
/// half-width is taken from the center spacing and extrapolated outward on
/// both ends.
///
/// Log spacing is only recognized from three centers up. Two centers are
/// always treated as linear, so log edges survive the
/// edges → centers → edges round trip only with at least 3 centers
/// (4 edges): `[1, 10, 100]` comes back as linear edges around `√10` and `√1000`.
///
/// # Errors
///
/// [`BinningError::UnsupportedSpacing`] for irregular centers, or for a
/// single center (no spacing to infer a width from).
pub fn edges_from_centers(centers: &[f64]) -> Result<BinEdges> {
    let n = centers.len();
    if is_logarithmic(centers, SPACING_RTOL) {
        let logs: Vec<f64> = centers.iter().map(|c| c.log10()).collect();
        let half_width = 0.5 * (logs[n - 1] - logs[0]) / (n - 1) as f64;
        let edges = iter::once(logs[0] - half_width)
            .chain(logs.iter().map(|l| l + half_width))
            .map(|l| 10f64.powf(l))
            .collect();
        BinEdges::new(edges)
    } else if n >= 2 && is_linear(centers, SPACING_RTOL) {
        let half_width = 0.5 * (centers[1] - centers[0]);
        let edges = iter::once(centers[0] - half_width)
            .chain(centers.iter().map(|c| c + half_width))
            .collect();
        BinEdges::new(edges)
    } else {
        Err(BinningError::UnsupportedSpacing)
    }
}

/// Widths of consecutive bins.
pub fn bin_widths(edges: &[f64]) -> Array1<f64> {
    edges.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_classification() {
        assert!(is_linear(&[0.0, 1.0, 2.0, 3.0], SPACING_RTOL));
        assert!(is_linear(&[-1.0, 0.0, 1.0], SPACING_RTOL));
        assert!(!is_linear(&[1.0, 10.0, 100.0], SPACING_RTOL));
        assert!(!is_linear(&[0.0, 1.0, 3.0], SPACING_RTOL));
    }

    #[test]
    fn short_sequences() {
        assert!(is_linear(&[0.0, 5.0], SPACING_RTOL));
        assert!(!is_logarithmic(&[1.0, 10.0], SPACING_RTOL));
        assert!(is_linear(&[], SPACING_RTOL));
    }

    #[test]
    fn logarithmic_classification() {
        assert!(is_logarithmic(&[1.0, 10.0, 100.0, 1000.0], SPACING_RTOL));
        assert!(!is_logarithmic(&[0.0, 1.0, 10.0], SPACING_RTOL));
        assert!(!is_logarithmic(&[-10.0, -1.0, 5.0], SPACING_RTOL));
        assert!(!is_logarithmic(&[1.0, 2.0, 3.0], SPACING_RTOL));
    }

    #[test]
    fn classification_tolerates_noise() {
        assert!(is_linear(&[0.0, 1.0, 2.000001, 3.0], SPACING_RTOL));
        assert!(!is_linear(&[0.0, 1.0, 2.01, 3.0], SPACING_RTOL));
    }

    #[test]
    fn spacing_of() {
        assert_eq!(Spacing::of(&[0.0, 1.0, 2.0], SPACING_RTOL), Spacing::Linear);
        assert_eq!(
            Spacing::of(&[1.0, 10.0, 100.0], SPACING_RTOL),
            Spacing::Logarithmic
        );
        assert_eq!(
            Spacing::of(&[0.0, 1.0, 5.0], SPACING_RTOL),
            Spacing::Irregular
        );
    }

    #[test]
    fn centers_single_bin() {
        let centers = centers_from_edges(&[2.0, 4.0]);
        assert_eq!(centers.len(), 1);
        assert_relative_eq!(centers[0], 3.0);
    }

    #[test]
    fn centers_log() {
        let centers = centers_from_edges(&[1.0, 100.0, 10000.0]);
        assert_relative_eq!(centers[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(centers[1], 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn centers_irregular() {
        let centers = centers_from_edges(&[0.0, 1.0, 4.0]);
        assert_relative_eq!(centers[0], 0.5);
        assert_relative_eq!(centers[1], 2.5);
    }

    #[test]
    fn edges_from_linear_centers() {
        let edges = edges_from_centers(&[0.5, 1.5, 2.5]).unwrap();
        assert_eq!(&edges[..], &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn edges_from_log_centers() {
        let edges = edges_from_centers(&[10.0, 1000.0, 100000.0]).unwrap();
        let expected = [1.0, 100.0, 1e4, 1e6];
        for (e, x) in edges.iter().zip(expected) {
            assert_relative_eq!(*e, x, max_relative = 1e-10);
        }
    }

    #[test]
    fn edges_from_irregular_centers_fails() {
        assert!(matches!(
            edges_from_centers(&[0.0, 1.0, 5.0]),
            Err(BinningError::UnsupportedSpacing)
        ));
        assert!(matches!(
            edges_from_centers(&[1.0]),
            Err(BinningError::UnsupportedSpacing)
        ));
    }

    #[test]
    fn two_log_centers_rebuild_linearly() {
        let centers = centers_from_edges(&[1.0, 10.0, 100.0]);
        let rebuilt = edges_from_centers(centers.as_slice().unwrap()).unwrap();
        assert!(is_linear(&rebuilt, SPACING_RTOL));
        assert_relative_eq!(rebuilt.lower(), 1.5 * 10f64.sqrt() - 0.5 * 1000f64.sqrt());
        assert!(rebuilt.lower() < 0.0);
    }

    #[test]
    fn widths() {
        let widths = bin_widths(&[0.0, 1.0, 4.0]);
        assert_eq!(widths.to_vec(), vec![1.0, 3.0]);
    }
}
