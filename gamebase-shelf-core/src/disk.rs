//! Renaming disk, tape and program images to `<name>_d<N><ext>`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::RenameError;
use crate::sanitize::sanitize_segment;

/// Recognized image extensions (compared case-insensitively, without the dot).
pub const DISK_IMAGE_EXTENSIONS: &[&str] = &[
    "d64", "d71", "d81", "g64", "x64", "t64", "tap", "prg", "p00", "lnx",
];

/// Suffix used for the intermediate name when renames have to be staged.
const STAGING_SUFFIX: &str = ".gbshelf-tmp";

/// Returns true if `path` has one of the [`DISK_IMAGE_EXTENSIONS`].
pub fn is_disk_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            DISK_IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Recursively collect every disk image file under `folder`, sorted by path.
pub fn find_disk_images(folder: &Path) -> Result<Vec<PathBuf>, RenameError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(folder) {
        let entry = entry.map_err(|source| RenameError::Walk {
            path: folder.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_disk_image(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// A planned rename of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskRename {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl DiskRename {
    /// The file already has its target name.
    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }
}

/// Plan renames for every image under `folder`.
///
/// Images are numbered from 1 in path order. Targets keep the image's
/// directory and use the lower-cased extension.
pub fn plan_disk_renames(folder: &Path, game_name: &str) -> Result<Vec<DiskRename>, RenameError> {
    let name = sanitize_segment(game_name);
    let images = find_disk_images(folder)?;

    Ok(images
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let ext = source
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let parent = source.parent().unwrap_or(folder);
            let target = parent.join(format!("{}_d{}.{}", name, i + 1, ext));
            DiskRename { source, target }
        })
        .collect())
}

/// Rename every image under `folder` to `<game_name>_d<N><ext>`.
///
/// Not transactional: an I/O error part-way leaves earlier renames in place.
/// When a target is currently occupied by another image of the same set,
/// all pending renames go through a temporary name first so nothing is
/// overwritten. Returns the full plan, including no-ops.
pub fn rename_disk_images(folder: &Path, game_name: &str) -> Result<Vec<DiskRename>, RenameError> {
    let plan = plan_disk_renames(folder, game_name)?;
    let pending: Vec<&DiskRename> = plan.iter().filter(|r| !r.is_noop()).collect();

    if let Some(blocked) = pending.iter().find(|r| r.target.is_dir()) {
        return Err(RenameError::TargetOccupied {
            path: blocked.target.clone(),
        });
    }

    let sources: HashSet<&Path> = plan.iter().map(|r| r.source.as_path()).collect();
    let needs_staging = pending
        .iter()
        .any(|r| sources.contains(r.target.as_path()) || r.target.exists());

    if needs_staging {
        let mut staged = Vec::with_capacity(pending.len());
        for rename in &pending {
            let mut tmp_name = rename.source.as_os_str().to_os_string();
            tmp_name.push(STAGING_SUFFIX);
            let tmp = PathBuf::from(tmp_name);
            fs::rename(&rename.source, &tmp)?;
            staged.push((tmp, &rename.target));
        }
        for (tmp, target) in staged {
            fs::rename(&tmp, target)?;
        }
    } else {
        for rename in &pending {
            fs::rename(&rename.source, &rename.target)?;
        }
    }

    Ok(plan)
}

#[cfg(test)]
#[path = "tests/disk_tests.rs"]
mod tests;
