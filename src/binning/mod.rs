//! Bin-edge geometry and the sub-binning search.
//!
//! This module describes one-dimensional binnings and the relations between
//! them:
//!
//! ```text
//! BinEdges ──► spacing   (linear / logarithmic / irregular, centers ⇄ edges)
//!     │
//!     ├──────► compare   (equality, coarseness, fine-binning checks)
//!     │
//!     ├──────► resolve   (coarse ⊂ fine as start/stop/stride per axis) ──► RebinSpec
//!     │
//!     └──────► oversample (coarse → fine by an integer factor)
//! ```
//!
//! # Design Principles
//!
//! - **Validated edges**: [`BinEdges`] is always strictly increasing and finite
//! - **One closeness rule**: every tolerant comparison goes through [`crate::utils::is_close`]
//! - **Absence is not failure**: the resolver returns `None` when no sub-binning exists

mod compare;
mod edges;
mod oversample;
mod resolve;
mod spacing;

pub use compare::{check_fine_binning, edges_equal, is_coarser};
pub use edges::BinEdges;
pub use oversample::{oversample, oversample_with};
pub use resolve::{find_axis_rebin, subbinning, subbinning_per_axis, AxisRebin, RebinSpec};
pub use spacing::{
    bin_widths, centers_from_edges, edges_from_centers, is_linear, is_logarithmic, Spacing,
};

/// Default relative tolerance for spacing classification.
pub const SPACING_RTOL: f64 = 1e-5;

/// Default relative tolerance for edge equality.
pub const EQUALITY_RTOL: f64 = 1e-8;
