//! binmaps: bin-edge geometry and integer rebinning for histogram-like maps.
//!
//! Maps here are numeric arrays binned along one or two physical axes (e.g.
//! an energy × cos(zenith) probability grid). This crate answers the
//! questions that come up when such maps are combined:
//!
//! - Is a binning linear, logarithmic or irregular? ([`Spacing`])
//! - Are two binnings the same? Is one coarser than the other? ([`edges_equal`], [`is_coarser`])
//! - Can a coarse binning be obtained from a fine one by merging a fixed
//!   number of bins? ([`subbinning`] → [`RebinSpec`])
//! - What does the map look like after that merge? ([`rebin`], [`Map::rebin_to`])
//!
//! It also provides edge oversampling ([`oversample`]), smoothing of
//! scattered samples by binned mean ([`smooth_map`]) and a common-binning
//! check over nested map collections ([`validate_common_binning`]).
//!
//! # Example
//!
//! ```
//! use binmaps::{rebin, subbinning, BinEdges, EQUALITY_RTOL};
//! use ndarray::array;
//!
//! let fine = BinEdges::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let coarse = BinEdges::new(vec![1.0, 3.0, 5.0]).unwrap();
//!
//! let spec = subbinning(&[coarse], &[fine], EQUALITY_RTOL).unwrap();
//! let out = rebin(&array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &spec).unwrap();
//! assert_eq!(out.as_slice().unwrap(), &[1.5, 3.5]);
//! ```

// Re-export approx traits for users who want to compare edges and maps
pub use approx;

pub mod binning;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod map;
pub mod rebin;
pub mod smooth;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Geometry and search
pub use binning::{
    bin_widths, centers_from_edges, check_fine_binning, edges_equal, edges_from_centers,
    find_axis_rebin, is_coarser, is_linear, is_logarithmic, oversample, oversample_with,
    subbinning, subbinning_per_axis, AxisRebin, BinEdges, RebinSpec, Spacing, EQUALITY_RTOL,
    SPACING_RTOL,
};

// Array operations
pub use rebin::rebin;
pub use smooth::smooth_map;

// Maps and collections
pub use map::{
    first_binning, validate_common_binning, validate_common_binning_with, LeafKeys, Map, MapTree,
};

// Configuration and errors
pub use config::{ConfigError, Tolerances};
pub use error::{BinningError, Result};

// Fingerprints
pub use fingerprint::{fingerprint_array, fingerprint_value};
