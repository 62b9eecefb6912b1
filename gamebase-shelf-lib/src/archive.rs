//! Zip extraction and info-file lookup.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use gamebase_shelf_core::{GameMetadata, parse_info_bytes};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::OrganizeError;

/// File name of the per-archive info file (compared case-insensitively).
pub const INFO_FILE_NAME: &str = "VERSION.NFO";

/// Extract `archive` into a fresh temporary directory.
///
/// The directory and its contents are removed when the returned handle drops.
/// Entries whose names would escape the directory are rejected by the zip
/// reader.
pub fn extract_to_temp(archive: &Path) -> Result<TempDir, OrganizeError> {
    let temp = tempfile::Builder::new().prefix("gamebase_").tempdir()?;
    let file = File::open(archive)?;
    let extract_err = |source| OrganizeError::Extract {
        archive: archive.to_path_buf(),
        source,
    };
    let mut zip = zip::ZipArchive::new(file).map_err(extract_err)?;
    zip.extract(temp.path()).map_err(extract_err)?;
    Ok(temp)
}

/// Find the first `VERSION.NFO` below `folder` in sorted walk order.
pub fn find_info_file(folder: &Path) -> Result<Option<PathBuf>, OrganizeError> {
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|e| OrganizeError::walk(folder, e))?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|n| n.eq_ignore_ascii_case(INFO_FILE_NAME))
        {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// Read and parse an info file.
pub fn read_info_file(path: &Path) -> Result<GameMetadata, OrganizeError> {
    let bytes = fs::read(path)?;
    Ok(parse_info_bytes(&bytes)?)
}

/// An extracted archive with its info file located and parsed.
#[derive(Debug)]
pub struct ExtractedGame {
    /// Keeps the temporary directory alive
    pub temp: TempDir,
    /// Folder holding the info file; this is what gets organized
    pub working_folder: PathBuf,
    pub metadata: GameMetadata,
}

/// Extract `archive`, locate its info file and parse it.
pub fn open_game(archive: &Path) -> Result<ExtractedGame, OrganizeError> {
    let temp = extract_to_temp(archive)?;
    let info = find_info_file(temp.path())?
        .ok_or_else(|| OrganizeError::NoInfoFile(archive.to_path_buf()))?;
    let metadata = read_info_file(&info)?;
    let working_folder = info
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| temp.path().to_path_buf());
    Ok(ExtractedGame {
        temp,
        working_folder,
        metadata,
    })
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
pub(crate) mod tests;
