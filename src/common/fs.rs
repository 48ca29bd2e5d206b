//! Common file system operations with unified error handling

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Remove a file or directory tree
///
/// A missing path is not an error: returns `Ok(false)` and leaves the file
/// system untouched. Returns `Ok(true)` when something was removed.
/// Symlinks are removed themselves, never followed.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(fs_error::remove_failed(path, &e)),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(true),
        // Lost a race with something else deleting it; the end state is the same.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(fs_error::remove_failed(path, &e)),
    }
}

/// Copy a directory tree recursively
///
/// Creates `dst` (and its parents) as needed and mirrors every directory,
/// file and symlink below `src`. When `src` is a plain file it is copied to
/// `dst` as a file. Returns the number of files copied.
///
/// Refuses to copy a directory into itself: `dst` may not be `src` or lie
/// anywhere below it.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<u64> {
    let src_metadata = match fs::metadata(src) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(fs_error::source_not_found(src));
        }
        Err(e) => return Err(fs_error::copy_failed(src, e)),
    };

    if !src_metadata.is_dir() {
        ensure_parent_dir(dst)?;
        fs::copy(src, dst).map_err(|e| fs_error::copy_failed(dst, e))?;
        return Ok(1);
    }

    if is_inside(dst, src) {
        return Err(fs_error::copy_failed(
            dst,
            "destination is inside the source bundle",
        ));
    }

    fs::create_dir_all(dst).map_err(|e| fs_error::copy_failed(dst, e))?;

    let mut files_copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            fs_error::copy_failed(&path, e)
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| fs_error::copy_failed(entry.path(), e))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_error::copy_failed(&target, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| fs_error::copy_failed(&target, e))?;
            files_copied += 1;
        }
    }

    Ok(files_copied)
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error::copy_failed(parent, e))?;
    }
    Ok(())
}

/// True when `path` is `root` or below it, after resolving symlinks and `..`
fn is_inside(path: &Path, root: &Path) -> bool {
    match (resolve(path), resolve(root)) {
        (Some(path), Some(root)) => path.starts_with(root),
        _ => false,
    }
}

/// Canonicalize the longest existing prefix of `path` and append the rest
///
/// `path` itself may not exist yet.
fn resolve(path: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(path).ok()?;
    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    loop {
        if let Ok(resolved) = current.canonicalize() {
            return Some(missing.iter().rev().fold(resolved, |acc, part| acc.join(part)));
        }
        missing.push(current.file_name()?);
        current = current.parent()?;
    }
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let pointee = fs::read_link(link).map_err(|e| fs_error::copy_failed(link, e))?;
    std::os::unix::fs::symlink(&pointee, target).map_err(|e| fs_error::copy_failed(target, e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| fs_error::copy_failed(target, e))
}
