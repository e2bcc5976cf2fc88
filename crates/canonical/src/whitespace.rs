//! Whitespace normalization.
//!
//! Whitespace here means Unicode whitespace (`char::is_whitespace`), so
//! tabs, CR/LF pairs and non-breaking spaces all count.

/// Collapses every whitespace run to one ASCII space and trims both ends.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  SELECT\t*\r\nFROM   t  "), "SELECT * FROM t");
/// assert_eq!(collapse_whitespace("   \n\t  "), "");
/// assert_eq!(collapse_whitespace("a\u{00A0}b"), "a b");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
