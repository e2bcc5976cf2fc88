//! Literal masking.
//!
//! [`parameterize`] replaces string and numeric literals with positional
//! placeholders (`_param1`, `_param2`, ...). Passes run in a fixed order and
//! each pass sees the output of the previous one, so a placeholder written
//! by an earlier pass is never re-matched:
//!
//! 1. single-quoted strings
//! 2. double-quoted strings
//! 3. numbers (optional leading `-`, integer or decimal)
//!
//! The placeholder counter is shared across all three passes.
//!
//! ```rust
//! use canonical::parameterize;
//!
//! let masked = parameterize("SELECT * FROM t WHERE name = 'bob' AND age > 30");
//! assert_eq!(masked.masked_text, "SELECT * FROM t WHERE name = _param1 AND age > _param2");
//! assert_eq!(masked.literals, vec!["'bob'", "30"]);
//! ```

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed prefix of every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "_param";

static SINGLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(?:\\'|[^'])*'").expect("single-quoted literal pattern"));

static DOUBLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?:\\"|[^"])*""#).expect("double-quoted literal pattern"));

/// A statement with its literals masked out.
///
/// `literals[k - 1]` is the exact source text (quotes and sign included)
/// that placeholder `_param{k}` replaced. A literal that swallowed an
/// earlier placeholder (a single-quoted run inside a double-quoted one)
/// is stored with that placeholder already expanded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiteralMaskedText {
    pub masked_text: String,
    pub literals: Vec<String>,
    /// Placeholders visible in `masked_text`, in text order.
    pub spans: Vec<PlaceholderSpan>,
}

/// Byte range of one placeholder in the masked text and the 0-based
/// index of the literal it stands for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceholderSpan {
    pub start: usize,
    pub end: usize,
    pub literal: usize,
}

impl LiteralMaskedText {
    /// Substitute every placeholder back with its literal.
    ///
    /// Substitution goes by recorded span, so placeholders followed by
    /// digits or identifiers that merely look like placeholders are
    /// handled exactly.
    pub fn reconstruct(&self) -> String {
        expand(&self.masked_text, 0, &self.spans, &self.literals)
    }

    /// Number of masked literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Mask string and numeric literals in `statement`.
///
/// Pure function of its input: the same text always produces the same
/// placeholders in the same order.
pub fn parameterize(statement: &str) -> LiteralMaskedText {
    let mut masked = LiteralMaskedText {
        masked_text: statement.to_string(),
        literals: Vec::new(),
        spans: Vec::new(),
    };

    let found = regex_matches(&masked.masked_text, &SINGLE_QUOTED);
    masked.mask(&found);
    let found = regex_matches(&masked.masked_text, &DOUBLE_QUOTED);
    masked.mask(&found);
    let found = find_numbers(&masked.masked_text);
    masked.mask(&found);

    masked
}

impl LiteralMaskedText {
    /// Replace each range (sorted, disjoint, byte offsets into the current
    /// masked text) with a fresh placeholder, shifting the spans already
    /// recorded.
    fn mask(&mut self, found: &[Range<usize>]) {
        if found.is_empty() {
            return;
        }

        let text = &self.masked_text;
        let mut out = String::with_capacity(text.len());
        let mut spans = Vec::with_capacity(self.spans.len() + found.len());
        let mut old = self.spans.iter().copied().peekable();
        let mut copied_to = 0usize;

        for range in found {
            while let Some(span) = old.next_if(|s| s.end <= range.start) {
                spans.push(shifted(span, copied_to, out.len()));
            }

            let mut swallowed = Vec::new();
            while let Some(span) = old.next_if(|s| s.start < range.end) {
                swallowed.push(span);
            }
            let literal = expand(&text[range.clone()], range.start, &swallowed, &self.literals);

            out.push_str(&text[copied_to..range.start]);
            self.literals.push(literal);
            let start = out.len();
            out.push_str(&placeholder(self.literals.len()));
            spans.push(PlaceholderSpan {
                start,
                end: out.len(),
                literal: self.literals.len() - 1,
            });
            copied_to = range.end;
        }

        for span in old {
            spans.push(shifted(span, copied_to, out.len()));
        }
        out.push_str(&text[copied_to..]);

        self.masked_text = out;
        self.spans = spans;
    }
}

/// Move a span that sits in the verbatim tail starting at `copied_to` to
/// its place in an output that currently ends at `out_len`.
fn shifted(span: PlaceholderSpan, copied_to: usize, out_len: usize) -> PlaceholderSpan {
    PlaceholderSpan {
        start: span.start - copied_to + out_len,
        end: span.end - copied_to + out_len,
        literal: span.literal,
    }
}

/// Expand `spans` (offsets relative to `base`) inside `text`.
fn expand(text: &str, base: usize, spans: &[PlaceholderSpan], literals: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied_to = 0usize;
    for span in spans {
        let (start, end) = (span.start - base, span.end - base);
        out.push_str(&text[copied_to..start]);
        match literals.get(span.literal) {
            Some(literal) => out.push_str(literal),
            None => out.push_str(&text[start..end]),
        }
        copied_to = end;
    }
    out.push_str(&text[copied_to..]);
    out
}

fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}")
}

fn regex_matches(text: &str, pattern: &Regex) -> Vec<Range<usize>> {
    pattern.find_iter(text).map(|m| m.range()).collect()
}

/// Characters that may not sit directly before a numeric literal.
fn blocks_number_start(c: char) -> bool {
    is_word_char(c) || c == ')' || c == ':'
}

/// Characters that may not sit directly after a numeric literal.
fn blocks_number_end(c: char) -> bool {
    is_word_char(c) || matches!(c, '(' | '.' | ':')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Numeric pass. Tries a match at every char boundary, taking the longest
/// run (`-?` digits, optionally `.` digits) and keeping it only when both
/// neighbours allow it. This keeps `table1`, `_param3`, `1.2.3`-style
/// version strings and `::int` casts intact.
fn find_numbers(text: &str) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut found = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        match match_number_at(&chars, i) {
            Some(end) => {
                let end_byte = chars.get(end).map_or(text.len(), |&(b, _)| b);
                found.push(chars[i].0..end_byte);
                i = end;
            }
            None => i += 1,
        }
    }

    found
}

/// Returns the exclusive end index (in `chars`) of a numeric literal
/// starting at `start`, if one is allowed there.
fn match_number_at(chars: &[(usize, char)], start: usize) -> Option<usize> {
    if start > 0 && blocks_number_start(chars[start - 1].1) {
        return None;
    }

    let mut pos = start;
    if chars[pos].1 == '-' {
        pos += 1;
    }

    let int_end = scan_digits(chars, pos);
    if int_end == pos {
        return None;
    }

    let mut end = int_end;
    if chars.get(int_end).map(|&(_, c)| c) == Some('.') {
        let frac_end = scan_digits(chars, int_end + 1);
        if frac_end > int_end + 1 {
            end = frac_end;
        }
    }

    match chars.get(end) {
        Some(&(_, c)) if blocks_number_end(c) => None,
        _ => Some(end),
    }
}

fn scan_digits(chars: &[(usize, char)], from: usize) -> usize {
    let mut pos = from;
    while chars.get(pos).is_some_and(|&(_, c)| c.is_ascii_digit()) {
        pos += 1;
    }
    pos
}
