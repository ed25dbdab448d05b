//! Oversampling of bin edges by an integer factor.

use std::num::NonZeroUsize;

use log::{info, warn};
use ndarray::Array1;

use super::edges::BinEdges;
use super::spacing::Spacing;
use crate::config::Tolerances;
use crate::error::Result;

/// Oversample `coarse` by `factor` using the default tolerances.
///
/// See [`oversample_with`].
pub fn oversample(coarse: &BinEdges, factor: NonZeroUsize) -> Result<BinEdges> {
    oversample_with(coarse, factor, &Tolerances::default())
}

/// Oversample `coarse` by `factor`.
///
/// - Linear edges: `factor * n_bins + 1` evenly spaced points over the same range.
/// - Logarithmic edges: the same number of points evenly spaced in log10 space.
/// - Irregular edges: every coarse bin is split into `factor` equal parts,
///   each part starting at its lower edge. The final upper edge is not
///   emitted.
///
/// # Errors
///
/// Propagates [`crate::BinningError::InvalidEdges`] if rounding collapses
/// two generated edges.
pub fn oversample_with(
    coarse: &BinEdges,
    factor: NonZeroUsize,
    tolerances: &Tolerances,
) -> Result<BinEdges> {
    let factor = factor.get();
    let n_points = factor * coarse.n_bins() + 1;

    let fine = match Spacing::of(coarse, tolerances.spacing_rtol) {
        Spacing::Linear => {
            info!("Oversampling linear output binning by factor {factor}.");
            pinned_endpoints(
                Array1::linspace(coarse.lower(), coarse.upper(), n_points),
                coarse,
            )
        }
        Spacing::Logarithmic => {
            info!("Oversampling logarithmic output binning by factor {factor}.");
            pinned_endpoints(
                Array1::logspace(10.0, coarse.lower().log10(), coarse.upper().log10(), n_points),
                coarse,
            )
        }
        Spacing::Irregular => {
            warn!("Irregular binning detected! Evenly oversampling by factor {factor}.");
            coarse
                .windows(2)
                .flat_map(|w| {
                    let (lower, step) = (w[0], (w[1] - w[0]) / factor as f64);
                    (0..factor).map(move |k| lower + k as f64 * step)
                })
                .collect()
        }
    };

    BinEdges::from_array(fine)
}

/// Replace the generated endpoints with the exact coarse endpoints.
fn pinned_endpoints(mut points: Array1<f64>, coarse: &BinEdges) -> Array1<f64> {
    let last = points.len() - 1;
    points[0] = coarse.lower();
    points[last] = coarse.upper();
    points
}
