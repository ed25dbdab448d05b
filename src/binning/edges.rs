//! Validated bin-edge sequences.

use std::ops::Deref;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::compare::{edges_equal, is_coarser};
use super::spacing::{bin_widths, centers_from_edges, edges_from_centers, Spacing};
use super::{EQUALITY_RTOL, SPACING_RTOL};
use crate::error::{BinningError, Result};

/// Boundaries partitioning an axis into contiguous bins.
///
/// Always holds at least two finite, strictly increasing values, so
/// `n_bins() >= 1`. Dereferences to `[f64]` for read access.
///
/// # Example
///
/// ```
/// use binmaps::BinEdges;
///
/// let edges = BinEdges::new(vec![1.0, 10.0, 100.0]).unwrap();
/// assert_eq!(edges.n_bins(), 2);
/// assert!(edges.is_logarithmic());
/// assert!(BinEdges::new(vec![1.0, 1.0]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct BinEdges(Box<[f64]>);

impl BinEdges {
    /// Create bin edges, validating length, finiteness and ordering.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(BinningError::InvalidEdges(format!(
                "need at least 2 edges, got {}",
                edges.len()
            )));
        }
        if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
            return Err(BinningError::InvalidEdges(format!(
                "edge {i} is not finite ({})",
                edges[i]
            )));
        }
        if let Some(i) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(BinningError::InvalidEdges(format!(
                "edges must be strictly increasing, but edge {} ({}) <= edge {} ({})",
                i + 1,
                edges[i + 1],
                i,
                edges[i]
            )));
        }
        Ok(Self(edges.into_boxed_slice()))
    }

    /// Create bin edges from an owned 1D array.
    pub fn from_array(edges: Array1<f64>) -> Result<Self> {
        Self::new(edges.to_vec())
    }

    /// Reconstruct edges from evenly spaced (linear or log) bin centers.
    ///
    /// See [`edges_from_centers`].
    pub fn from_centers(centers: &[f64]) -> Result<Self> {
        edges_from_centers(centers)
    }

    /// Number of bins (`len() - 1`).
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.0.len() - 1
    }

    /// Lower edge of the first bin.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.0[0]
    }

    /// Upper edge of the last bin.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Zero-copy ndarray view of the edges.
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }

    /// Owned ndarray copy of the edges.
    pub fn to_array(&self) -> Array1<f64> {
        self.view().to_owned()
    }

    /// Bin centers; geometric means for logarithmic edges.
    pub fn centers(&self) -> Array1<f64> {
        centers_from_edges(self)
    }

    /// Bin widths.
    pub fn widths(&self) -> Array1<f64> {
        bin_widths(self)
    }

    /// Spacing classification with the default tolerance.
    pub fn spacing(&self) -> Spacing {
        Spacing::of(self, SPACING_RTOL)
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        super::spacing::is_linear(self, SPACING_RTOL)
    }

    #[inline]
    pub fn is_logarithmic(&self) -> bool {
        super::spacing::is_logarithmic(self, SPACING_RTOL)
    }

    /// Edge-by-edge equality with the default tolerance.
    pub fn approx_eq(&self, other: &BinEdges) -> bool {
        edges_equal(self, other, EQUALITY_RTOL)
    }

    /// Check whether `self` lies inside and is coarser than `fine`.
    pub fn is_coarser_than(&self, fine: &BinEdges) -> bool {
        is_coarser(self, fine)
    }

    /// Consume into the underlying boxed slice.
    pub fn into_inner(self) -> Box<[f64]> {
        self.0
    }
}

impl Deref for BinEdges {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for BinEdges {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for BinEdges {
    type Error = BinningError;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::new(edges)
    }
}

impl TryFrom<&[f64]> for BinEdges {
    type Error = BinningError;

    fn try_from(edges: &[f64]) -> Result<Self> {
        Self::new(edges.to_vec())
    }
}

impl From<BinEdges> for Vec<f64> {
    fn from(edges: BinEdges) -> Self {
        edges.0.into_vec()
    }
}
