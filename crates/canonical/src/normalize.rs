//! Token normalization for literal-masked SQL.
//!
//! [`normalize`] makes layout and keyword casing irrelevant:
//!
//! - reserved words from [`SQL_KEYWORDS`] are upper-cased (word-boundary,
//!   case-insensitive match); identifiers and placeholders are untouched
//! - every operator run (`=`, `<>`, `+`, `||`, `->>`, `::` ...) gets one
//!   space on each side, commas get none before and one after
//! - every whitespace run collapses to a single space and the ends are
//!   trimmed
//! - no space is kept just inside parentheses
//!
//! Tokens are never reordered or dropped. An operator run is taken as one
//! token, so `doc->'k'` and `doc -> 'k'` agree. Negative numbers were
//! already masked, so the sign is never split off a literal.
//!
//! ```rust
//! use canonical::normalize;
//!
//! assert_eq!(
//!     normalize("select a,b\nfrom   t where x=a+_param1 or f( y )"),
//!     "SELECT a, b FROM t WHERE x = a + _param1 or f(y)"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::whitespace::collapse_whitespace;

/// Reserved words rewritten to upper case.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "ON", "GROUP", "BY",
    "ORDER", "LIMIT", "OFFSET", "HAVING", "UNION", "ALL", "DISTINCT", "INSERT", "INTO", "VALUES",
    "UPDATE", "SET", "DELETE", "CREATE", "WITH", "AS", "CASE", "WHEN", "THEN", "END",
];

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    let alternation = SQL_KEYWORDS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("keyword pattern")
});

/// Canonicalize keyword case, operator spacing and whitespace.
pub fn normalize(masked_text: &str) -> String {
    let upper = uppercase_keywords(masked_text);
    let spaced = space_operators(&upper);
    tighten_parens(&collapse_whitespace(&spaced))
}

/// Upper-case every [`SQL_KEYWORDS`] occurrence, leaving all other text as is.
pub fn uppercase_keywords(text: &str) -> String {
    KEYWORD
        .replace_all(text, |caps: &Captures<'_>| caps[0].to_ascii_uppercase())
        .into_owned()
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '=' | '<' | '>' | '!' | '+' | '-' | '*' | '/' | '%' | '|' | '&' | '~' | '^' | ':' | '@'
    )
}

/// Pads operator runs and commas so that `a=b` and `a = b` end up
/// identical once whitespace is collapsed.
fn space_operators(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_operator_char(ch) {
            out.push(' ');
            out.push(ch);
            while let Some(&next) = chars.peek() {
                if !is_operator_char(next) {
                    break;
                }
                out.push(next);
                chars.next();
            }
            out.push(' ');
        } else if ch == ',' {
            let kept = out.trim_end().len();
            out.truncate(kept);
            out.push_str(", ");
        } else {
            out.push(ch);
        }
    }

    out
}

/// Drops the single space after `(` and before `)`. Expects collapsed
/// whitespace.
fn tighten_parens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' if out.ends_with('(') => {}
            ')' if out.ends_with(' ') => {
                out.pop();
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
