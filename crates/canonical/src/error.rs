use thiserror::Error;

/// Errors raised by the canonical layer.
///
/// Splitting and canonicalization are total over valid text; the only
/// failure is source bytes that are not valid UTF-8. It is surfaced to the
/// caller as-is and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CanonicalError {
    #[error("source `{source_id}` is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Encoding {
        source_id: String,
        valid_up_to: usize,
    },
}
