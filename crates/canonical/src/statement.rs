//! Source decoding and per-source statement numbering.

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;
use crate::split::split_statements;

/// One statement as it appeared in its source.
///
/// `ordinal` is 1-based and counts emitted statements only, so fragments
/// dropped by the splitter never leave gaps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RawStatement {
    pub source_id: String,
    pub ordinal: usize,
    pub text: String,
}

/// Split a source into numbered [`RawStatement`]s.
///
/// ```rust
/// use canonical::split_source;
///
/// let stmts = split_source("q.sql", "SELECT 1;\n;\nSELECT 2;");
/// assert_eq!(stmts.len(), 2);
/// assert_eq!(stmts[1].ordinal, 2);
/// assert_eq!(stmts[1].text, "SELECT 2");
/// ```
pub fn split_source(source_id: &str, text: &str) -> Vec<RawStatement> {
    split_statements(text)
        .into_iter()
        .enumerate()
        .map(|(idx, text)| RawStatement {
            source_id: source_id.to_string(),
            ordinal: idx + 1,
            text,
        })
        .collect()
}

/// Decode raw source bytes as UTF-8.
///
/// A leading byte-order mark is stripped. Anything that is not valid UTF-8
/// fails with [`CanonicalError::Encoding`].
pub fn decode_source(source_id: &str, bytes: &[u8]) -> Result<String, CanonicalError> {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(err) => Err(CanonicalError::Encoding {
            source_id: source_id.to_string(),
            valid_up_to: err.valid_up_to(),
        }),
    }
}
