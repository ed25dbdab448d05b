//! Binned maps and nested map collections.
//!
//! - [`Map`] - A value array with one [`BinEdges`] per axis
//! - [`MapTree`] - A nested collection of maps, e.g. one map per channel
//! - [`validate_common_binning`] - Check that every map in a tree shares one binning

mod tree;

pub use tree::{first_binning, validate_common_binning, validate_common_binning_with, LeafKeys, MapTree};

use ndarray::{Array1, Array2, ArrayD};

use crate::binning::{subbinning, BinEdges};
use crate::config::Tolerances;
use crate::error::{BinningError, Result};
use crate::rebin::rebin;

/// A numeric array binned along every axis.
///
/// Invariant: `values.shape()[i] == axes[i].n_bins()` for every axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    values: ArrayD<f64>,
    axes: Vec<BinEdges>,
}

impl Map {
    /// Create a map, checking that the value shape matches the binning.
    pub fn new(values: ArrayD<f64>, axes: Vec<BinEdges>) -> Result<Self> {
        if values.ndim() != axes.len() {
            return Err(BinningError::ShapeMismatch(format!(
                "map has {} dimensions but {} binning axes",
                values.ndim(),
                axes.len()
            )));
        }
        for (axis, (&len, edges)) in values.shape().iter().zip(&axes).enumerate() {
            if len != edges.n_bins() {
                return Err(BinningError::ShapeMismatch(format!(
                    "axis {axis} has {len} values but {} bins",
                    edges.n_bins()
                )));
            }
        }
        Ok(Self { values, axes })
    }

    pub fn new_1d(edges: BinEdges, values: Array1<f64>) -> Result<Self> {
        Self::new(values.into_dyn(), vec![edges])
    }

    pub fn new_2d(edges1: BinEdges, edges2: BinEdges, values: Array2<f64>) -> Result<Self> {
        Self::new(values.into_dyn(), vec![edges1, edges2])
    }

    #[inline]
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    #[inline]
    pub fn axes(&self) -> &[BinEdges] {
        &self.axes
    }

    #[inline]
    pub fn axis(&self, index: usize) -> Option<&BinEdges> {
        self.axes.get(index)
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn into_parts(self) -> (ArrayD<f64>, Vec<BinEdges>) {
        (self.values, self.axes)
    }

    /// Rebin onto coarser axes using the default tolerances.
    ///
    /// See [`Map::rebin_to_with`].
    pub fn rebin_to(&self, coarse: &[BinEdges]) -> Result<Map> {
        self.rebin_to_with(coarse, &Tolerances::default())
    }

    /// Rebin onto coarser axes that are an exact integer sub-binning of this
    /// map's axes, averaging the merged bins.
    ///
    /// # Errors
    ///
    /// [`BinningError::IncompatibleBinning`] if no integer sub-binning maps
    /// the current axes onto `coarse`.
    pub fn rebin_to_with(&self, coarse: &[BinEdges], tolerances: &Tolerances) -> Result<Map> {
        let spec = subbinning(coarse, &self.axes, tolerances.equality_rtol).ok_or_else(|| {
            BinningError::IncompatibleBinning(format!(
                "requested binning ({}) is not an integer sub-binning of the map binning ({})",
                describe(coarse),
                describe(&self.axes)
            ))
        })?;
        let values = rebin(&self.values, &spec)?;
        Map::new(values, coarse.to_vec())
    }
}

fn describe(axes: &[BinEdges]) -> String {
    axes.iter()
        .map(|e| format!("{} bins over [{}, {}]", e.n_bins(), e.lower(), e.upper()))
        .collect::<Vec<_>>()
        .join(" x ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn edges(values: &[f64]) -> BinEdges {
        BinEdges::new(values.to_vec()).unwrap()
    }

    #[test]
    fn new_checks_shape() {
        let e = edges(&[0.0, 1.0, 2.0]);
        assert!(Map::new_1d(e.clone(), array![1.0, 2.0]).is_ok());
        assert!(matches!(
            Map::new_1d(e.clone(), array![1.0, 2.0, 3.0]),
            Err(BinningError::ShapeMismatch(_))
        ));
        assert!(matches!(
            Map::new(array![1.0, 2.0].into_dyn(), vec![e.clone(), e]),
            Err(BinningError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn rebin_to_coarse() {
        let fine = edges(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let map = Map::new_1d(fine, array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let coarse = edges(&[1.0, 3.0, 5.0]);
        let out = map.rebin_to(std::slice::from_ref(&coarse)).unwrap();
        assert_eq!(out.axes(), &[coarse]);
        assert_eq!(out.values(), &array![1.5, 3.5].into_dyn());
    }

    #[test]
    fn rebin_to_incompatible() {
        let map = Map::new_1d(edges(&[0.0, 1.0, 2.0]), array![1.0, 2.0]).unwrap();
        assert!(matches!(
            map.rebin_to(&[edges(&[0.5, 1.5])]),
            Err(BinningError::IncompatibleBinning(_))
        ));
    }
}
