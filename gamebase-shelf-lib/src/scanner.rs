//! Discovery of game archives in a source tree.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::OrganizeError;

/// Extension of the archives GameBase collections are distributed in.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Returns true if `path` ends in `.zip` (any case).
pub fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
        .unwrap_or(false)
}

/// Recursively find every archive under `source`, sorted by path.
pub fn find_archives(source: &Path) -> Result<Vec<PathBuf>, OrganizeError> {
    if !source.is_dir() {
        return Err(OrganizeError::SourceMissing(source.to_path_buf()));
    }

    let mut archives = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| OrganizeError::walk(source, e))?;
        if entry.file_type().is_file() && is_archive(entry.path()) {
            archives.push(entry.into_path());
        }
    }
    archives.sort();
    Ok(archives)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn finds_archives_recursively_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("B")).unwrap();
        fs::create_dir_all(root.join("A")).unwrap();
        fs::write(root.join("B/zorro.zip"), b"").unwrap();
        fs::write(root.join("A/turrican.ZIP"), b"").unwrap();
        fs::write(root.join("A/readme.txt"), b"").unwrap();

        let found = find_archives(root).unwrap();
        assert_eq!(
            found,
            vec![root.join("A/turrican.ZIP"), root.join("B/zorro.zip")]
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = find_archives(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, OrganizeError::SourceMissing(_)));
    }
}
