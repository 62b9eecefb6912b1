use std::path::PathBuf;

use gamebase_shelf_core::{ParseError, RenameError, ResolveError, TemplateError};
use thiserror::Error;

/// Errors that can occur while organizing archives.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source directory is missing
    #[error("Source directory '{}' does not exist", .0.display())]
    SourceMissing(PathBuf),

    /// I/O error while copying, moving or reading files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed
    #[error("Error scanning {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The archive could not be opened or extracted
    #[error("Could not extract {}: {source}", .archive.display())]
    Extract {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// No `VERSION.NFO` inside the archive
    #[error("No VERSION.NFO in {}", .0.display())]
    NoInfoFile(PathBuf),

    #[error("Could not parse metadata: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Disk rename failed: {0}")]
    Rename(#[from] RenameError),
}

impl OrganizeError {
    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}
