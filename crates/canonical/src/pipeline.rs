//! Canonicalization pipeline: literal masking, then normalization, then
//! hashing.
//!
//! Each stage is a pure function and the composition is too, so
//! [`canonicalize`] may run on any thread in any order.

use crate::form::CanonicalForm;
use crate::hash::hash_text;
use crate::normalize::normalize;
use crate::params::parameterize;

/// Reduce a statement to its [`CanonicalForm`].
///
/// `normalize(parameterize(statement).masked_text)` gives the text; the
/// fingerprint is its SHA-256. No state, no failure modes.
pub fn canonicalize(statement: &str) -> CanonicalForm {
    let masked = parameterize(statement);
    let text = normalize(&masked.masked_text);
    let fingerprint = hash_text(&text);

    CanonicalForm {
        text,
        fingerprint,
        literal_count: masked.literals.len(),
    }
}
