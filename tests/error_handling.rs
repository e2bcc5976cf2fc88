use std::fs;

use sqlfp::{
    build_index, decode_source, index_paths, load_source, split_statements, CanonicalError,
    PipelineConfig, PipelineError, SourceUnit,
};

#[test]
fn invalid_utf8_surfaces_encoding_error() {
    let err = decode_source("legacy.sql", b"SELECT 'caf\xE9'").unwrap_err();
    assert!(matches!(
        err,
        CanonicalError::Encoding { ref source_id, valid_up_to: 11 } if source_id == "legacy.sql"
    ));
}

#[test]
fn encoding_error_aborts_path_indexing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.sql"), "SELECT 1;").unwrap();
    fs::write(dir.path().join("b.sql"), b"SELECT '\xFF';").unwrap();

    let result = index_paths(&[dir.path()], "sql", &PipelineConfig::default());
    assert!(matches!(
        result,
        Err(PipelineError::Canonical(CanonicalError::Encoding { .. }))
    ));
}

#[test]
fn empty_directory_is_no_sources() {
    let dir = tempfile::tempdir().unwrap();
    let result = index_paths(&[dir.path()], "sql", &PipelineConfig::default());
    assert!(matches!(result, Err(PipelineError::NoSources)));
}

#[test]
fn unreadable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_source(&dir.path().join("missing.sql")).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }));
    assert!(err.to_string().contains("missing.sql"));
}

// Malformed SQL never fails; it degrades.

#[test]
fn unbalanced_input_degrades_to_one_statement() {
    let statements = split_statements("SELECT (a FROM t; SELECT 'b; SELECT c");
    assert_eq!(statements, vec!["SELECT (a FROM t; SELECT 'b; SELECT c"]);
}

#[test]
fn garbage_input_still_indexes() {
    let sources = vec![
        SourceUnit::new("noise.sql", ")))(((;;'\"\"\"; 12abc; -- ; ??"),
        SourceUnit::new("blank.sql", "   \n\t  "),
    ];
    let index = build_index(&sources, &PipelineConfig::default());
    assert!(index.statement_count() >= 1);
    assert!(index
        .groups()
        .iter()
        .all(|g| g.fingerprint.len() == 64));
}
