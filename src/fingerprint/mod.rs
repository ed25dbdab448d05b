//! Stable content fingerprints for arrays and serializable values.
//!
//! Used to key caches of derived maps. Arrays are hashed over their raw
//! element bytes; everything else over a canonical JSON rendering (sorted
//! keys, `,`/`:` separators, no whitespace, and `NaN`/`Infinity`/`-Infinity`
//! tokens for non-finite floats so they never hash like `null`).

mod canonical;

use ndarray::{ArrayBase, Data, Dimension};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// SHA-256 over the little-endian bytes of the elements in logical order.
///
/// The shape is not part of the fingerprint: `[1, 2, 3, 4]` and
/// `[[1, 2], [3, 4]]` hash the same, regardless of memory layout.
pub fn fingerprint_array<S, D>(array: &ArrayBase<S, D>) -> String
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut hasher = Sha256::new();
    for value in array.iter() {
        hasher.update(value.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// SHA-256 over the canonical JSON rendering of `value`.
///
/// # Errors
///
/// [`crate::BinningError::Serialization`] if `value` cannot be represented
/// as JSON (e.g. a map with non-string keys).
pub fn fingerprint_value<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let text = canonical::to_canonical_string(value)?;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
