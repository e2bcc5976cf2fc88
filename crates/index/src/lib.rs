//! # sqlfp Index
//!
//! Groups canonicalized SQL statements by fingerprint and records every
//! `(source, ordinal)` occurrence. The full set of groups is the artifact
//! handed to downstream analysis: one representative raw statement per
//! distinct fingerprint, plus where it occurred.
//!
//! ## Core Features
//!
//! - **Deterministic fold**: identical canonical text always lands in the
//!   same group; occurrences keep ingestion order; groups keep first-sighting
//!   order.
//! - **Monotonic**: groups are never evicted or deleted within a run.
//! - **Parallel-friendly**: [`canonicalize_batch`] fans canonicalization out
//!   with rayon while [`FingerprintIndex::ingest_canonical`] stays the single
//!   insertion point. [`SharedIndex`] serializes direct concurrent ingests.
//!
//! ## Example Usage
//!
//! ```
//! use index::FingerprintIndex;
//!
//! let mut index = FingerprintIndex::new();
//! let a = index.ingest("a.sql", 1, "SELECT * FROM t WHERE id = 1");
//! let b = index.ingest("b.sql", 4, "select * from t where id=99");
//!
//! assert_eq!(a, b);
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.groups()[0].occurrences.len(), 2);
//! assert_eq!(index.groups()[0].representative, "SELECT * FROM t WHERE id = 1");
//! ```

mod batch;
mod group;
mod shared;

pub use batch::canonicalize_batch;
pub use group::{FingerprintGroup, Occurrence};
pub use shared::SharedIndex;

use canonical::{canonicalize, CanonicalForm, RawStatement};
use hashbrown::HashMap;
use tracing::debug;

/// Fingerprint index built over one run.
#[derive(Debug, Default, Clone)]
pub struct FingerprintIndex {
    /// Groups in first-sighting order.
    groups: Vec<FingerprintGroup>,
    /// Fingerprint to position in `groups`.
    positions: HashMap<String, usize>,
    statements: usize,
}

impl FingerprintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `raw_text` and record it under its fingerprint.
    ///
    /// Returns the fingerprint. The first raw text seen for a fingerprint
    /// becomes the group's representative.
    pub fn ingest(&mut self, source_id: &str, ordinal: usize, raw_text: &str) -> String {
        let form = canonicalize(raw_text);
        let fingerprint = form.fingerprint.clone();
        self.insert_form(source_id, ordinal, raw_text, form);
        fingerprint
    }

    /// Record a statement whose canonical form was computed elsewhere.
    ///
    /// `form` must be `canonicalize(&statement.text)`. Returns true when
    /// this created a new group.
    pub fn ingest_canonical(&mut self, statement: &RawStatement, form: CanonicalForm) -> bool {
        self.insert_form(&statement.source_id, statement.ordinal, &statement.text, form)
    }

    /// Sequentially ingest every statement. Returns how many new groups
    /// were created.
    pub fn ingest_statements<'a, I>(&mut self, statements: I) -> usize
    where
        I: IntoIterator<Item = &'a RawStatement>,
    {
        let mut created = 0;
        for stmt in statements {
            let form = canonicalize(&stmt.text);
            if self.ingest_canonical(stmt, form) {
                created += 1;
            }
        }
        created
    }

    pub(crate) fn insert_form(
        &mut self,
        source_id: &str,
        ordinal: usize,
        raw_text: &str,
        form: CanonicalForm,
    ) -> bool {
        self.statements += 1;
        let occurrence = Occurrence::new(source_id, ordinal, raw_text);

        if let Some(&pos) = self.positions.get(&form.fingerprint) {
            self.groups[pos].occurrences.push(occurrence);
            return false;
        }

        debug!(
            fingerprint = %form.fingerprint,
            source_id,
            ordinal,
            "fingerprint_group_created"
        );
        self.positions
            .insert(form.fingerprint.clone(), self.groups.len());
        self.groups.push(FingerprintGroup {
            fingerprint: form.fingerprint,
            canonical_text: form.text,
            representative: raw_text.to_string(),
            occurrences: vec![occurrence],
        });
        true
    }

    /// All groups in first-sighting order.
    pub fn groups(&self) -> &[FingerprintGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<FingerprintGroup> {
        self.groups
    }

    pub fn get(&self, fingerprint: &str) -> Option<&FingerprintGroup> {
        self.positions.get(fingerprint).map(|&pos| &self.groups[pos])
    }

    /// Groups seen more than once.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &FingerprintGroup> {
        self.groups.iter().filter(|g| g.is_duplicate())
    }

    /// Number of distinct fingerprints.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of statements ingested, duplicates included.
    pub fn statement_count(&self) -> usize {
        self.statements
    }
}
