//! Error types for binning operations.

/// Errors raised by the binning engine.
///
/// The sub-binning search does not use this type: "no integer sub-binning
/// exists" is an expected outcome and is reported as `None`.
#[derive(Debug, thiserror::Error)]
pub enum BinningError {
    #[error("only bin centers evenly spaced in log or linear space can be converted to edges")]
    UnsupportedSpacing,

    #[error("maps have different {axis} binning")]
    BinningMismatch { axis: &'static str },

    #[error("incompatible binning: {0}")]
    IncompatibleBinning(String),

    #[error("invalid bin edges: {0}")]
    InvalidEdges(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("map collection contains no maps")]
    EmptyCollection,

    #[error("invalid map collection at `{path}`: {reason}")]
    InvalidCollection { path: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BinningError>;
