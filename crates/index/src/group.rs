use serde::{Deserialize, Serialize};

/// Where a statement was seen: source identifier plus 1-based ordinal,
/// and the raw statement text as it appeared there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub source_id: String,
    pub ordinal: usize,
    pub text: String,
}

impl Occurrence {
    pub fn new(source_id: impl Into<String>, ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            ordinal,
            text: text.into(),
        }
    }
}

/// All statements sharing one canonical fingerprint.
///
/// Created on the first sighting of a fingerprint and only ever appended
/// to afterwards. `representative` is the raw text of that first sighting
/// and is the unit handed to downstream analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintGroup {
    pub fingerprint: String,
    pub canonical_text: String,
    pub representative: String,
    /// In ingestion order.
    pub occurrences: Vec<Occurrence>,
}

impl FingerprintGroup {
    /// True when the fingerprint was seen more than once.
    pub fn is_duplicate(&self) -> bool {
        self.occurrences.len() > 1
    }

    /// Number of distinct sources the fingerprint appeared in.
    pub fn source_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .occurrences
            .iter()
            .map(|o| o.source_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
