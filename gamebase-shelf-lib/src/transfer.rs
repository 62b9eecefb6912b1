//! Copying and moving organized games into place.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::OrganizeError;

/// Whether the source is kept after organizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transfer {
    #[default]
    Copy,
    Move,
}

impl Transfer {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Copy => "COPIED",
            Self::Move => "MOVED",
        }
    }
}

/// Recursively copy `src` to `dst`, creating `dst`.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<(), OrganizeError> {
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| OrganizeError::walk(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Move a directory, falling back to copy + delete across filesystems.
pub fn move_dir(src: &Path, dst: &Path) -> Result<(), OrganizeError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_dir_all(src, dst)?;
    fs::remove_dir_all(src)?;
    Ok(())
}

/// Copy or move a single file, creating the destination's parent.
pub fn transfer_file(src: &Path, dst: &Path, transfer: Transfer) -> Result<(), OrganizeError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    match transfer {
        Transfer::Copy => {
            fs::copy(src, dst)?;
        }
        Transfer::Move => {
            if fs::rename(src, dst).is_err() {
                fs::copy(src, dst)?;
                fs::remove_file(src)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_dir_all_preserves_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("sub/empty")).unwrap();
        fs::write(src.join("a.d64"), b"a").unwrap();
        fs::write(src.join("sub/b.txt"), b"b").unwrap();

        let dst = tmp.path().join("out/game");
        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read(dst.join("a.d64")).unwrap(), b"a");
        assert_eq!(fs::read(dst.join("sub/b.txt")).unwrap(), b"b");
        assert!(dst.join("sub/empty").is_dir());
        assert!(src.join("a.d64").exists());
    }

    #[test]
    fn move_dir_removes_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.d64"), b"a").unwrap();

        let dst = tmp.path().join("deep/nested/game");
        move_dir(&src, &dst).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(dst.join("a.d64")).unwrap(), b"a");
    }

    #[test]
    fn transfer_file_copy_and_move() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("game.zip");
        fs::write(&src, b"zip").unwrap();

        let copied = tmp.path().join("a/game.zip");
        transfer_file(&src, &copied, Transfer::Copy).unwrap();
        assert!(src.exists());
        assert!(copied.exists());

        let moved = tmp.path().join("b/game.zip");
        transfer_file(&src, &moved, Transfer::Move).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(moved).unwrap(), b"zip");
    }
}
