//! The canonical form of a statement.

use serde::{Deserialize, Serialize};

/// A statement reduced to its literal-independent, layout-independent text
/// plus the content hash used as its identity.
///
/// Two statements that differ only in whitespace, keyword casing or literal
/// values (same number and placement of literals) share a `CanonicalForm`.
///
/// ```rust
/// use canonical::canonicalize;
///
/// let a = canonicalize("select * from T where x=1");
/// let b = canonicalize("SELECT   *\nFROM T\nWHERE x = 2");
/// assert_eq!(a, b);
/// assert_eq!(a.text, "SELECT * FROM T WHERE x = _param1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CanonicalForm {
    /// Normalized, literal-masked statement text.
    pub text: String,
    /// Lowercase hex SHA-256 of `text`.
    pub fingerprint: String,
    /// How many literals were masked. Follows from `text`, so it never
    /// splits two otherwise equal forms.
    pub literal_count: usize,
}
