//! sqlfp canonical statement layer.
//!
//! Turns raw multi-statement SQL scripts into individually addressable
//! statements and reduces each one to a canonical, literal-independent form
//! suitable for exact-duplicate detection by content hash.
//!
//! ## What we do
//!
//! - Split scripts on top-level `;`, honoring quotes and parentheses
//!   ([`split_statements`], [`split_source`])
//! - Mask string and numeric literals with positional placeholders
//!   ([`parameterize`])
//! - Upper-case reserved words, normalize operator spacing, collapse
//!   whitespace ([`normalize`])
//! - Hash the result with SHA-256 ([`canonicalize`], [`hash_text`])
//!
//! ## What we don't do
//!
//! No SQL grammar, no AST, no dialects, no validation. Two statements are
//! equal here only if their canonical text is byte-equal.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Every function is total over valid text;
//! the only error is undecodable source bytes ([`decode_source`]).
//!
//! ```rust
//! use canonical::{canonicalize, split_source};
//!
//! let stmts = split_source("a.sql", "INSERT INTO a VALUES (1); INSERT INTO a VALUES (2);");
//! let forms: Vec<_> = stmts.iter().map(|s| canonicalize(&s.text)).collect();
//! assert_eq!(forms[0].text, "INSERT INTO a VALUES (_param1)");
//! assert_eq!(forms[0].fingerprint, forms[1].fingerprint);
//! ```

mod error;
mod form;
mod hash;
mod normalize;
mod params;
mod pipeline;
mod split;
mod statement;
mod whitespace;

pub use crate::error::CanonicalError;
pub use crate::form::CanonicalForm;
pub use crate::hash::{hash_text, is_fingerprint, FINGERPRINT_HEX_LEN};
pub use crate::normalize::{normalize, uppercase_keywords, SQL_KEYWORDS};
pub use crate::params::{parameterize, LiteralMaskedText, PlaceholderSpan, PLACEHOLDER_PREFIX};
pub use crate::pipeline::canonicalize;
pub use crate::split::{has_word_char, split_statements, STATEMENT_TERMINATOR};
pub use crate::statement::{decode_source, split_source, RawStatement};
pub use crate::whitespace::collapse_whitespace;
