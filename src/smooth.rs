//! Smoothing of scattered samples into a 2D map by binned mean.

use ndarray::{Array2, Zip};

use crate::binning::BinEdges;
use crate::error::{BinningError, Result};

/// Bin scattered `(value, x, y)` samples onto a grid and average per cell.
///
/// Sample `k` lands in cell `(i, j)` where `edges1[i] <= x[k] < edges1[i + 1]`
/// and likewise for `y[k]` against `edges2`; the last bin on each axis also
/// includes its upper edge. Samples outside the grid, or with a NaN
/// coordinate, are dropped. Cells without samples are NaN.
///
/// # Errors
///
/// [`BinningError::ShapeMismatch`] if the three sample slices differ in length.
///
/// # Example
///
/// ```
/// use binmaps::{smooth_map, BinEdges};
///
/// let e = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
/// let cz = BinEdges::new(vec![-1.0, 1.0]).unwrap();
/// let grid = smooth_map(&[1.0, 3.0, 5.0], &[0.2, 0.8, 1.5], &[0.0, 0.0, 0.5], &e, &cz).unwrap();
/// assert_eq!(grid[[0, 0]], 2.0);
/// assert_eq!(grid[[1, 0]], 5.0);
/// ```
pub fn smooth_map(
    values: &[f64],
    axis1: &[f64],
    axis2: &[f64],
    edges1: &BinEdges,
    edges2: &BinEdges,
) -> Result<Array2<f64>> {
    if axis1.len() != values.len() || axis2.len() != values.len() {
        return Err(BinningError::ShapeMismatch(format!(
            "{} values but {} axis-1 and {} axis-2 coordinates",
            values.len(),
            axis1.len(),
            axis2.len()
        )));
    }

    let shape = (edges1.n_bins(), edges2.n_bins());
    let mut sums = Array2::<f64>::zeros(shape);
    let mut counts = Array2::<u32>::zeros(shape);

    for ((&v, &x), &y) in values.iter().zip(axis1).zip(axis2) {
        if let (Some(i), Some(j)) = (locate(edges1, x), locate(edges2, y)) {
            sums[[i, j]] += v;
            counts[[i, j]] += 1;
        }
    }

    Zip::from(&mut sums).and(&counts).for_each(|sum, &count| {
        *sum = if count > 0 {
            *sum / count as f64
        } else {
            f64::NAN
        };
    });
    Ok(sums)
}

/// Bin index of `x`, with the last bin closed on the right.
#[inline]
fn locate(edges: &[f64], x: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if x.is_nan() || x < edges[0] || x > edges[last] {
        return None;
    }
    if x == edges[last] {
        return Some(last - 1);
    }
    Some(edges.partition_point(|&e| e <= x) - 1)
}
