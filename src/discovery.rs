//! Source discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use canonical::decode_source;
use tracing::warn;
use walkdir::WalkDir;

use crate::{PipelineError, SourceUnit};

/// Collect every file under `roots` whose extension matches `extension`
/// (case-insensitive, no leading dot).
///
/// Roots may be files or directories; directories are walked recursively.
/// A root that is a file is kept regardless of its extension. The result
/// is sorted and free of duplicates.
pub fn discover_sources<P: AsRef<Path>>(
    roots: &[P],
    extension: &str,
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut found = Vec::new();

    for root in roots {
        let root = root.as_ref();
        if root.is_file() {
            found.push(root.to_path_buf());
            continue;
        }
        if !root.exists() {
            return Err(PipelineError::Io {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
            });
        }

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(root).to_path_buf();
                PipelineError::Io {
                    path,
                    source: err.into(),
                }
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                found.push(entry.into_path());
            }
        }
    }

    found.sort();
    found.dedup();
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Read a file and decode it as UTF-8. The source id is the path as given.
pub fn load_source(path: &Path) -> Result<SourceUnit, PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let id = path.display().to_string();

    match decode_source(&id, &bytes) {
        Ok(text) => Ok(SourceUnit { id, text }),
        Err(err) => {
            warn!(source_id = %id, error = %err, "source_decode_failure");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_matching_files_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.sql"), "SELECT 1").unwrap();
        fs::write(dir.path().join("a.SQL"), "SELECT 2").unwrap();
        fs::write(dir.path().join("nested/c.sql"), "SELECT 3").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let found = discover_sources(&[dir.path()], "sql").unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.SQL", "b.sql", "nested/c.sql"]);
    }

    #[test]
    fn explicit_file_root_is_kept_once() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, "SELECT 1").unwrap();

        let found = discover_sources(&[file.clone(), file.clone()], "sql").unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = discover_sources(&[missing], "sql").unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn load_source_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.sql");
        fs::write(&file, b"SELECT '\xC3\x28'").unwrap();

        let err = load_source(&file).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Canonical(canonical::CanonicalError::Encoding { valid_up_to: 8, .. })
        ));
    }

    #[test]
    fn load_source_uses_path_as_id() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ok.sql");
        fs::write(&file, "SELECT 1;").unwrap();

        let unit = load_source(&file).unwrap();
        assert_eq!(unit.id, file.display().to_string());
        assert_eq!(unit.text, "SELECT 1;");
    }
}
