//! Batch canonicalization.
//!
//! Statements are independent, so canonicalization can fan out across
//! threads. The fold into the index stays on one thread: results come back
//! index-aligned with the input, and callers feed them to
//! [`FingerprintIndex::ingest_canonical`](crate::FingerprintIndex::ingest_canonical)
//! in that order.

use canonical::{canonicalize, CanonicalForm, RawStatement};
use rayon::prelude::*;

/// Canonicalize every statement, in parallel when `parallel` is true.
///
/// Output order always matches input order.
pub fn canonicalize_batch(statements: &[RawStatement], parallel: bool) -> Vec<CanonicalForm> {
    if parallel {
        statements
            .par_iter()
            .map(|stmt| canonicalize(&stmt.text))
            .collect()
    } else {
        statements
            .iter()
            .map(|stmt| canonicalize(&stmt.text))
            .collect()
    }
}
