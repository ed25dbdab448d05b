//! Equality and containment relations between two binnings.

use log::{error, info};

use super::edges::BinEdges;
use crate::error::{BinningError, Result};
use crate::utils::all_close_pairwise;

/// Check whether two edge sequences are equal within a relative tolerance.
///
/// Sequences of different length are never equal. `b` supplies the reference
/// values for the relative term.
pub fn edges_equal(a: &[f64], b: &[f64], rtol: f64) -> bool {
    a.len() == b.len() && all_close_pairwise(a.iter().copied(), b.iter().copied(), rtol)
}

/// Check whether `coarse` lies inside of and is coarser than `fine`.
///
/// Only rules out range and density mismatches: the coarse range must be
/// covered by `fine`, and at least as many fine edges as coarse edges must
/// fall inside the coarse range. It does not prove that the coarse edges are
/// a subset of the fine ones; use [`super::subbinning`] for that.
pub fn is_coarser(coarse: &[f64], fine: &[f64]) -> bool {
    let (Some(&c_first), Some(&c_last), Some(&f_first), Some(&f_last)) =
        (coarse.first(), coarse.last(), fine.first(), fine.last())
    else {
        return false;
    };

    // contained?
    if c_first < f_first || c_last > f_last {
        return false;
    }

    // actually coarser?
    let lo = coarse.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = coarse.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let inside = fine.iter().filter(|&&f| f >= lo && f <= hi).count();
    inside >= coarse.len()
}

/// Check whether a requested fine binning can be used to oversample `coarse`.
///
/// Returns `Ok(false)` when no fine binning was requested and `Ok(true)` when
/// the requested one is compatible.
///
/// # Errors
///
/// [`BinningError::IncompatibleBinning`] if `fine` does not cover or is not
/// finer than `coarse`.
pub fn check_fine_binning(fine: Option<&BinEdges>, coarse: &BinEdges) -> Result<bool> {
    let Some(fine) = fine else {
        return Ok(false);
    };

    if is_coarser(coarse, fine) {
        info!("Using requested binning for oversampling.");
        Ok(true)
    } else {
        let msg = format!(
            "requested oversampled binning ({} bins over [{}, {}]) is coarser than output binning ({} bins over [{}, {}])",
            fine.n_bins(),
            fine.lower(),
            fine.upper(),
            coarse.n_bins(),
            coarse.lower(),
            coarse.upper()
        );
        error!("{msg}. Aborting.");
        Err(BinningError::IncompatibleBinning(msg))
    }
}
