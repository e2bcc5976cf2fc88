//! Statement splitting for multi-statement SQL scripts.
//!
//! The splitter is a single left-to-right scan carrying three pieces of
//! state: whether we are inside a single-quoted literal, inside a
//! double-quoted literal, and how many parentheses are open. A `;` only
//! terminates a statement when all three are at rest.
//!
//! There is no SQL grammar here. Malformed input never fails: an
//! unterminated quote or unbalanced parenthesis simply keeps the
//! terminator suppressed until end of text, and the remainder is emitted
//! as one statement.
//!
//! # Examples
//!
//! ```rust
//! use canonical::split_statements;
//!
//! let statements = split_statements("SELECT ';' FROM t; SELECT 1");
//! assert_eq!(statements, vec!["SELECT ';' FROM t", "SELECT 1"]);
//!
//! let statements = split_statements("SELECT f(1; 2) FROM t; SELECT 2");
//! assert_eq!(statements, vec!["SELECT f(1; 2) FROM t", "SELECT 2"]);
//! ```

/// Statement terminator recognized at quote depth 0 and paren depth 0.
pub const STATEMENT_TERMINATOR: char = ';';

const ESCAPE: char = '\\';

/// Scan state carried across characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ScanState {
    in_single: bool,
    in_double: bool,
    paren_depth: usize,
}

impl ScanState {
    fn in_quotes(&self) -> bool {
        self.in_single || self.in_double
    }

    fn at_top_level(&self) -> bool {
        !self.in_quotes() && self.paren_depth == 0
    }

    /// Advance over `ch`. Returns true when `ch` terminates a statement.
    fn step(&mut self, ch: char, prev: Option<char>) -> bool {
        let escaped = prev == Some(ESCAPE);
        match ch {
            '\'' if !self.in_double && !escaped => {
                self.in_single = !self.in_single;
                false
            }
            '"' if !self.in_single && !escaped => {
                self.in_double = !self.in_double;
                false
            }
            '(' if !self.in_quotes() => {
                self.paren_depth += 1;
                false
            }
            ')' if !self.in_quotes() => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                false
            }
            STATEMENT_TERMINATOR => self.at_top_level(),
            _ => false,
        }
    }
}

/// Split `text` into trimmed statement texts, terminators removed.
///
/// Empty fragments are never emitted, and fragments with no word character
/// (pure whitespace, or punctuation-only leftovers such as a stray `;;`)
/// are dropped by [`has_word_char`]. A trailing line comment attached to
/// real code still contains word characters and is kept.
pub fn split_statements(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut state = ScanState::default();
    let mut buf = String::with_capacity(text.len().min(4096));
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if state.step(ch, prev) {
            push_statement(&mut statements, &buf);
            buf.clear();
        } else {
            buf.push(ch);
        }
        prev = Some(ch);
    }

    // Unbalanced input lands here too: depth > 0 or an open quote just
    // means the terminator never fired for the remainder.
    push_statement(&mut statements, &buf);

    statements.retain(|s| has_word_char(s));
    statements
}

fn push_statement(statements: &mut Vec<String>, buf: &str) {
    let trimmed = buf.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

/// Returns true when `text` contains at least one word character
/// (alphanumeric or `_`).
///
/// This is the comment-only filter applied after splitting. It is a
/// heuristic: a statement made only of comment text that happens to contain
/// words passes it, so `-- note` is kept while `--` or `;` alone is not.
pub fn has_word_char(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_terminators() {
        let out = split_statements("SELECT 1; SELECT 2;\nSELECT 3");
        assert_eq!(out, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
    }

    #[test]
    fn terminator_inside_single_quotes_is_content() {
        let out = split_statements("SELECT ';' FROM t; SELECT 1");
        assert_eq!(out.len(), 2);
        assert!(out[0].contains(';'));
    }

    #[test]
    fn terminator_inside_double_quotes_is_content() {
        let out = split_statements(r#"SELECT "a;b" FROM t; SELECT 1"#);
        assert_eq!(out, vec![r#"SELECT "a;b" FROM t"#, "SELECT 1"]);
    }

    #[test]
    fn terminator_inside_parens_is_content() {
        let out = split_statements("SELECT f(1; 2) FROM t; SELECT 2");
        assert_eq!(out, vec!["SELECT f(1; 2) FROM t", "SELECT 2"]);
    }

    #[test]
    fn mixed_quotes_do_not_toggle_each_other() {
        let out = split_statements(r#"SELECT "it's;fine" FROM t; SELECT 'say "hi";' FROM u"#);
        assert_eq!(
            out,
            vec![r#"SELECT "it's;fine" FROM t"#, r#"SELECT 'say "hi";' FROM u"#]
        );
    }

    #[test]
    fn escaped_quote_does_not_close_literal() {
        let out = split_statements(r"SELECT 'a\';b' FROM t; SELECT 2");
        assert_eq!(out, vec![r"SELECT 'a\';b' FROM t", "SELECT 2"]);
    }

    #[test]
    fn quoted_parens_do_not_change_depth() {
        let out = split_statements("SELECT '(' FROM t; SELECT ')' ; SELECT 3");
        assert_eq!(out, vec!["SELECT '(' FROM t", "SELECT ')'", "SELECT 3"]);
    }

    #[test]
    fn depth_is_floored_at_zero() {
        let out = split_statements("SELECT 1); SELECT 2");
        assert_eq!(out, vec!["SELECT 1)", "SELECT 2"]);
    }

    #[test]
    fn unbalanced_paren_keeps_remainder_together() {
        let out = split_statements("SELECT (1; SELECT 2; SELECT 3");
        assert_eq!(out, vec!["SELECT (1; SELECT 2; SELECT 3"]);
    }

    #[test]
    fn unterminated_quote_keeps_remainder_together() {
        let out = split_statements("SELECT 1; SELECT 'oops; SELECT 3");
        assert_eq!(out, vec!["SELECT 1", "SELECT 'oops; SELECT 3"]);
    }

    #[test]
    fn drops_fragments_without_word_chars() {
        let out = split_statements(";;  ;\n\t; SELECT 1;  -- ;");
        assert_eq!(out, vec!["SELECT 1"]);
    }

    #[test]
    fn comment_attached_to_code_is_kept() {
        let out = split_statements("SELECT 1 -- trailing note\n;");
        assert_eq!(out, vec!["SELECT 1 -- trailing note"]);
    }

    #[test]
    fn empty_and_blank_inputs_yield_nothing() {
        assert!(split_statements("").is_empty());
        assert!(split_statements("   \n\t ").is_empty());
    }

    #[test]
    fn no_terminator_yields_whole_text() {
        assert_eq!(split_statements("  SELECT 1  "), vec!["SELECT 1"]);
    }
}
