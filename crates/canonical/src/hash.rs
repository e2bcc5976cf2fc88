//! Content hashing for canonical statement text.
//!
//! Fingerprints are plain SHA-256 over the UTF-8 bytes of the canonical
//! text, hex encoded in lower case:
//!
//! ```text
//! fingerprint = hex(SHA-256(canonical_text_bytes))   // 64 chars
//! ```
//!
//! ```rust
//! use canonical::hash_text;
//!
//! let fp = hash_text("SELECT a FROM t");
//! assert_eq!(fp.len(), 64);
//! assert_eq!(fp, hash_text("SELECT a FROM t"));
//! assert_ne!(fp, hash_text("SELECT b FROM t"));
//! ```

use sha2::{Digest, Sha256};

/// Length in hex characters of every fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Hash `text` with SHA-256 and return the lowercase hex digest.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// True when `candidate` looks like a fingerprint produced by [`hash_text`].
pub fn is_fingerprint(candidate: &str) -> bool {
    candidate.len() == FINGERPRINT_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_text(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let fp = hash_text("INSERT INTO a VALUES (_param1)");
        assert!(is_fingerprint(&fp));
        assert!(!is_fingerprint(&fp.to_ascii_uppercase()));
        assert!(!is_fingerprint("abc"));
    }

    #[test]
    fn unicode_text_hashes_deterministically() {
        for text in ["", "SELECT 'こんにちは'", "emoji \u{1f600}"] {
            assert_eq!(hash_text(text), hash_text(text));
        }
    }
}
