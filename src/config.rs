//! Tolerance configuration with builder pattern.
//!
//! [`Tolerances`] groups the relative tolerances used when classifying
//! spacing and when comparing two edge sequences. It uses the `bon` crate
//! for builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use binmaps::Tolerances;
//!
//! // All defaults
//! let tol = Tolerances::builder().build().unwrap();
//! assert_eq!(tol, Tolerances::default());
//!
//! // Looser edge matching for edges read back from text
//! let tol = Tolerances::builder().equality_rtol(1e-6).build().unwrap();
//! assert_eq!(tol.equality_rtol, 1e-6);
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::binning::{EQUALITY_RTOL, SPACING_RTOL};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A tolerance is negative, NaN or infinite.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidTolerance { field: &'static str, value: f64 },
}

// =============================================================================
// Tolerances
// =============================================================================

/// Relative tolerances for spacing classification and edge equality.
///
/// Deserialization runs the same validation as the builder; missing fields
/// take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder)]
#[serde(try_from = "RawTolerances")]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct Tolerances {
    /// Tolerance for linear/logarithmic classification. Default: `1e-5`.
    #[builder(default = SPACING_RTOL)]
    pub spacing_rtol: f64,

    /// Tolerance for edge-by-edge equality. Default: `1e-8`.
    #[builder(default = EQUALITY_RTOL)]
    pub equality_rtol: f64,
}

impl<S: tolerances_builder::IsComplete> TolerancesBuilder<S> {
    /// Build and validate the tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] if any field is negative or
    /// not finite.
    pub fn build(self) -> Result<Tolerances, ConfigError> {
        let tolerances = self.__build_internal();
        tolerances.validate()?;
        Ok(tolerances)
    }
}

impl Tolerances {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("spacing_rtol", self.spacing_rtol),
            ("equality_rtol", self.equality_rtol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { field, value });
            }
        }
        Ok(())
    }
}

/// Unvalidated wire form of [`Tolerances`].
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTolerances {
    spacing_rtol: f64,
    equality_rtol: f64,
}

impl Default for RawTolerances {
    fn default() -> Self {
        let Tolerances {
            spacing_rtol,
            equality_rtol,
        } = Tolerances::default();
        Self {
            spacing_rtol,
            equality_rtol,
        }
    }
}

impl TryFrom<RawTolerances> for Tolerances {
    type Error = ConfigError;

    fn try_from(raw: RawTolerances) -> Result<Self, ConfigError> {
        let tolerances = Self {
            spacing_rtol: raw.spacing_rtol,
            equality_rtol: raw.equality_rtol,
        };
        tolerances.validate()?;
        Ok(tolerances)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            spacing_rtol: SPACING_RTOL,
            equality_rtol: EQUALITY_RTOL,
        }
    }
}
