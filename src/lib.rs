//! Workspace umbrella crate for sqlfp (SQL statement fingerprinting).
//!
//! This crate stitches the canonical layer and the fingerprint index into a
//! source-level pipeline: split every source into statements, canonicalize
//! each statement, fold the results into one [`FingerprintIndex`], and
//! render the index as the JSON [`AnalysisReport`] handed to downstream
//! analysis.
//!
//! ```
//! use sqlfp::{build_index, PipelineConfig, SourceUnit};
//!
//! let sources = vec![
//!     SourceUnit::new("a.sql", "INSERT INTO a VALUES (1); INSERT INTO a VALUES (2);"),
//!     SourceUnit::new("b.sql", "insert into a values (3)"),
//! ];
//! let index = build_index(&sources, &PipelineConfig::default());
//!
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.groups()[0].occurrences.len(), 3);
//! ```

pub mod config;
pub mod discovery;
pub mod report;

pub use canonical::{
    canonicalize, collapse_whitespace, decode_source, hash_text, normalize, parameterize,
    split_source, split_statements, CanonicalError, CanonicalForm, LiteralMaskedText,
    RawStatement,
};
pub use index::{canonicalize_batch, FingerprintGroup, FingerprintIndex, Occurrence, SharedIndex};

pub use crate::config::{ConfigLoadError, PipelineConfig, SqlfpConfig};
pub use crate::discovery::{discover_sources, load_source};
pub use crate::report::{AnalysisReport, ReportSummary, SourceEntry};

use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{info, Level};

/// Errors from the source-level pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("canonicalization failure: {0}")]
    Canonical(#[from] CanonicalError),

    #[error("i/o failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report serialization failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no source files found")]
    NoSources,
}

/// One text blob plus the stable identifier it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub id: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// What one source contributed to an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSummary {
    pub statements: usize,
    pub new_groups: usize,
}

/// Split `text`, canonicalize every statement and ingest it under
/// `source_id`.
pub fn process_source(index: &mut FingerprintIndex, source_id: &str, text: &str) -> SourceSummary {
    let statements = split_source(source_id, text);
    let new_groups = index.ingest_statements(&statements);
    let summary = SourceSummary {
        statements: statements.len(),
        new_groups,
    };
    info!(
        source_id,
        statements = summary.statements,
        new_groups = summary.new_groups,
        "source_processed"
    );
    summary
}

/// Build one index over all `sources`.
///
/// Statements are folded in source order, then ordinal order, whether or
/// not canonicalization runs in parallel.
pub fn build_index(sources: &[SourceUnit], cfg: &PipelineConfig) -> FingerprintIndex {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "pipeline.build_index",
        sources = sources.len(),
        parallel = cfg.use_parallel
    );
    let _guard = span.enter();

    let statements: Vec<RawStatement> = sources
        .iter()
        .flat_map(|source| split_source(&source.id, &source.text))
        .collect();
    let forms = canonicalize_batch(&statements, cfg.use_parallel);

    let mut index = FingerprintIndex::new();
    for (statement, form) in statements.iter().zip(forms) {
        index.ingest_canonical(statement, form);
    }

    info!(
        statements = index.statement_count(),
        groups = index.len(),
        duplicate_groups = index.duplicate_groups().count(),
        elapsed_micros = start.elapsed().as_micros(),
        "index_built"
    );
    index
}

/// Discover, load and index every matching file under `roots`, returning
/// the index together with the ids of all loaded sources.
///
/// Fails on the first unreadable or undecodable file, and with
/// [`PipelineError::NoSources`] when nothing matched.
pub fn index_paths<P: AsRef<Path>>(
    roots: &[P],
    extension: &str,
    cfg: &PipelineConfig,
) -> Result<(FingerprintIndex, Vec<String>), PipelineError> {
    let paths = discover_sources(roots, extension)?;
    if paths.is_empty() {
        return Err(PipelineError::NoSources);
    }

    let sources = paths
        .iter()
        .map(|path| load_source(path))
        .collect::<Result<Vec<_>, _>>()?;
    let ids = sources.iter().map(|s| s.id.clone()).collect();

    Ok((build_index(&sources, cfg), ids))
}
