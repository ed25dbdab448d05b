//! Integer sub-binning search.
//!
//! Given a coarse and a fine binning per axis, find the window and stride
//! that make the fine edges reproduce the coarse edges exactly:
//!
//! ```text
//! fine:    0   1   2   3   4   5   6
//!              ^       ^       ^
//! coarse:      1       3       5        → AxisRebin { start: 1, stop: 5, stride: 2 }
//! ```
//!
//! `stop` is the fine index of the last coarse edge, i.e. the exclusive end
//! of the fine *bin* window that collapses onto the coarse bins.

use log::debug;
use ndarray::{s, ArrayView1};
use serde::{Deserialize, Serialize};

use super::edges::BinEdges;
use crate::utils::all_close_pairwise;

// ============================================================================
// AxisRebin / RebinSpec
// ============================================================================

/// Rebinning window for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisRebin {
    /// First fine bin of the window.
    pub start: usize,
    /// Exclusive end of the fine bin window.
    pub stop: usize,
    /// Number of fine bins merged into one coarse bin.
    pub stride: usize,
}

impl AxisRebin {
    #[inline]
    pub fn new(start: usize, stop: usize, stride: usize) -> Self {
        Self { start, stop, stride }
    }

    /// Number of coarse bins this window produces.
    ///
    /// `None` for a zero stride or a window whose `stop` precedes `start`.
    #[inline]
    pub fn n_bins(&self) -> Option<usize> {
        self.stop.checked_sub(self.start)?.checked_div(self.stride)
    }
}

impl From<(usize, usize, usize)> for AxisRebin {
    fn from((start, stop, stride): (usize, usize, usize)) -> Self {
        Self::new(start, stop, stride)
    }
}

/// Per-axis rebinning windows, in axis order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebinSpec(Vec<AxisRebin>);

impl RebinSpec {
    pub fn new(axes: Vec<AxisRebin>) -> Self {
        Self(axes)
    }

    /// Windows in axis order.
    #[inline]
    pub fn axes(&self) -> &[AxisRebin] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AxisRebin> {
        self.0.iter()
    }
}

impl FromIterator<AxisRebin> for RebinSpec {
    fn from_iter<I: IntoIterator<Item = AxisRebin>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RebinSpec {
    type Item = &'a AxisRebin;
    type IntoIter = std::slice::Iter<'a, AxisRebin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Search
// ============================================================================

/// Find the first `(start, stride)` for which `fine[start..=stop; stride]`
/// equals `coarse`.
///
/// Candidates are tried by increasing `start`, then by increasing `stride`;
/// the first match wins.
pub fn find_axis_rebin(coarse: &[f64], fine: &[f64], rtol: f64) -> Option<AxisRebin> {
    let n_coarse = coarse.len();
    let n_fine = fine.len();
    if n_coarse < 2 || n_fine < n_coarse {
        return None;
    }

    let span = n_coarse - 1;
    let fine = ArrayView1::from(fine);

    for start in 0..=(n_fine - n_coarse) {
        let max_stride = (n_fine - 1 - start) / span;
        for stride in 1..=max_stride {
            let stop = start + span * stride;
            let window = fine.slice(s![start..=stop;stride]);
            if all_close_pairwise(coarse.iter().copied(), window.iter().copied(), rtol) {
                return Some(AxisRebin::new(start, stop, stride));
            }
        }
    }
    None
}

/// Check whether the coarse binning can be retrieved from the fine one via
/// integer rebinning on every axis.
///
/// Axes are searched in order and the search stops at the first axis without
/// a match, so later axes are never examined. Returns `None` when no
/// sub-binning exists or when the axis counts differ.
pub fn subbinning(coarse: &[BinEdges], fine: &[BinEdges], rtol: f64) -> Option<RebinSpec> {
    if coarse.len() != fine.len() {
        debug!(
            "sub-binning: {} coarse axes vs {} fine axes",
            coarse.len(),
            fine.len()
        );
        return None;
    }

    let mut axes = Vec::with_capacity(coarse.len());
    for (axis, (c, f)) in coarse.iter().zip(fine).enumerate() {
        match find_axis_rebin(c, f, rtol) {
            Some(rebin) => {
                debug!("sub-binning: axis {axis} matched {rebin:?}");
                axes.push(rebin);
            }
            None => {
                debug!("sub-binning: no match on axis {axis}, giving up");
                return None;
            }
        }
    }
    Some(RebinSpec(axes))
}

/// Search every axis independently.
///
/// Unlike [`subbinning`], a failing axis does not stop the search, which
/// tells the caller exactly which axes cannot be rebinned. Axes beyond the
/// shorter of the two inputs are ignored.
pub fn subbinning_per_axis(
    coarse: &[BinEdges],
    fine: &[BinEdges],
    rtol: f64,
) -> Vec<Option<AxisRebin>> {
    coarse
        .iter()
        .zip(fine)
        .map(|(c, f)| find_axis_rebin(c, f, rtol))
        .collect()
}
