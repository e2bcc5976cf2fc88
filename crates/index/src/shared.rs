use std::sync::{Mutex, MutexGuard};

use canonical::canonicalize;

use crate::group::FingerprintGroup;
use crate::FingerprintIndex;

/// A [`FingerprintIndex`] that many threads can feed.
///
/// Canonicalization runs outside the lock; only the insertion is
/// serialized, so concurrent `ingest` calls behave like some sequential
/// order of the same calls.
#[derive(Debug, Default)]
pub struct SharedIndex {
    inner: Mutex<FingerprintIndex>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `raw_text` and record the occurrence. Returns the
    /// fingerprint.
    pub fn ingest(&self, source_id: &str, ordinal: usize, raw_text: &str) -> String {
        let form = canonicalize(raw_text);
        let fingerprint = form.fingerprint.clone();
        self.lock().insert_form(source_id, ordinal, raw_text, form);
        fingerprint
    }

    /// Snapshot of the current groups in first-sighting order.
    pub fn groups(&self) -> Vec<FingerprintGroup> {
        self.lock().groups().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Unwrap into the plain index once all writers are done.
    pub fn into_inner(self) -> FingerprintIndex {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, FingerprintIndex> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<FingerprintIndex> for SharedIndex {
    fn from(index: FingerprintIndex) -> Self {
        Self {
            inner: Mutex::new(index),
        }
    }
}
