//! The JSON hand-off report.
//!
//! One entry per fingerprint group (the representative statement is what
//! downstream analysis consumes) plus a per-source listing so results can
//! be fanned back out to every `(source, ordinal)`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use index::{FingerprintGroup, FingerprintIndex};
use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// Bump when the report layout changes.
pub const REPORT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    pub format_version: u32,
    pub summary: ReportSummary,
    pub groups: Vec<FingerprintGroup>,
    /// Source id to its statements in ordinal order.
    pub sources: BTreeMap<String, Vec<SourceEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub sources: usize,
    pub statements: usize,
    pub groups: usize,
    pub duplicate_groups: usize,
    /// Statements beyond the first in each group.
    pub redundant_statements: usize,
}

/// One statement of a source, with its raw SQL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEntry {
    pub ordinal: usize,
    pub fingerprint: String,
    pub sql: String,
}

impl AnalysisReport {
    /// Build the report from a finished index.
    ///
    /// Sources that produced no statements are not listed; pass their ids
    /// in `empty_sources` to have them appear with an empty list.
    pub fn from_index<S: AsRef<str>>(index: &FingerprintIndex, empty_sources: &[S]) -> Self {
        let mut sources: BTreeMap<String, Vec<SourceEntry>> = empty_sources
            .iter()
            .map(|id| (id.as_ref().to_string(), Vec::new()))
            .collect();

        for group in index.groups() {
            for occurrence in &group.occurrences {
                sources
                    .entry(occurrence.source_id.clone())
                    .or_default()
                    .push(SourceEntry {
                        ordinal: occurrence.ordinal,
                        fingerprint: group.fingerprint.clone(),
                        sql: occurrence.text.clone(),
                    });
            }
        }
        for entries in sources.values_mut() {
            entries.sort_by_key(|e| e.ordinal);
        }

        let duplicate_groups = index.duplicate_groups().count();
        let summary = ReportSummary {
            sources: sources.len(),
            statements: index.statement_count(),
            groups: index.len(),
            duplicate_groups,
            redundant_statements: index.statement_count() - index.len(),
        };

        Self {
            format_version: REPORT_FORMAT_VERSION,
            summary,
            groups: index.groups().to_vec(),
            sources,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, PipelineError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the report to `path`, creating parent directories.
    pub fn write_json(&self, path: &Path, pretty: bool) -> Result<(), PipelineError> {
        let json = self.to_json(pretty)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
