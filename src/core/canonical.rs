//! KeySequence canonicalisation
//!
//! Every lookup in the dynamic registry goes through `canonicalize`. The
//! encoding joins canonical key names with `SEPARATOR`; since no key name
//! contains the separator, the encoding is injective.

use crate::core::error::DispatchError;
use crate::core::types::{CanonicalKey, KeySequence};

/// Separator between key names in a `CanonicalKey`
pub const SEPARATOR: &str = "+";

/// Encodes a key sequence as a lookup key.
///
/// Pure and deterministic. Fails only on an empty sequence.
pub fn canonicalize(sequence: &KeySequence) -> Result<CanonicalKey, DispatchError> {
    if sequence.is_empty() {
        return Err(DispatchError::EmptySequence);
    }

    let encoded = sequence
        .iter()
        .map(|key| key.name())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    Ok(CanonicalKey::new(encoded))
}
