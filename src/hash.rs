//! BLAKE3 hashing utilities for bundle integrity

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a directory tree
///
/// Covers relative paths, entry kinds (so empty directories count), file
/// contents and symlink targets. Entries are sorted by path, so the result
/// only depends on the tree, never on where it lives or on readdir order.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(fs_error::copy_failed(path, "not a directory"));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| fs_error::copy_failed(e.path().unwrap_or(path), &e))?;
        entries.push(entry);
    }
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut hasher = Hasher::new();
    for entry in entries {
        let entry_path = entry.path();
        let relative_path = entry_path
            .strip_prefix(path)
            .unwrap_or(entry_path)
            .to_string_lossy();
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        let file_type = entry.file_type();
        if file_type.is_dir() {
            hasher.update(b"d");
        } else if file_type.is_symlink() {
            hasher.update(b"l");
            let pointee = std::fs::read_link(entry_path).map_err(|e| fs_error::copy_failed(entry_path, e))?;
            hasher.update(pointee.to_string_lossy().as_bytes());
        } else {
            hasher.update(b"f");
            update_with_file(&mut hasher, entry_path)?;
        }

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Calculate BLAKE3 hash of a single file's contents
pub fn hash_file(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    update_with_file(&mut hasher, path)?;
    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Check whether two paths hold identical contents
///
/// Directories are compared as whole trees and plain files by content. A
/// file on one side and a directory on the other never match.
pub fn trees_match(left: &Path, right: &Path) -> Result<bool> {
    match (left.is_dir(), right.is_dir()) {
        (true, true) => Ok(hash_directory(left)? == hash_directory(right)?),
        (false, false) => Ok(hash_file(left)? == hash_file(right)?),
        _ => Ok(false),
    }
}

fn update_with_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| fs_error::copy_failed(path, e))?;

    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| fs_error::copy_failed(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use tempfile::TempDir;

    fn make_tree(root: &Path) {
        std::fs::create_dir_all(root.join("Contents/MacOS")).unwrap();
        std::fs::write(root.join("Contents/Info.plist"), "<plist/>").unwrap();
        std::fs::write(root.join("Contents/MacOS/midimon"), b"\x7fELF").unwrap();
    }

    #[test]
    fn test_hash_is_prefixed_and_stable() {
        let temp = TempDir::new().unwrap();
        make_tree(temp.path());

        let hash = hash_directory(temp.path()).unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
        assert_eq!(hash, hash_directory(temp.path()).unwrap());
    }

    #[test]
    fn test_identical_trees_in_different_locations_match() {
        let temp = TempDir::new().unwrap();
        make_tree(&temp.path().join("a"));
        make_tree(&temp.path().join("nested/b"));

        assert!(trees_match(&temp.path().join("a"), &temp.path().join("nested/b")).unwrap());
    }

    #[test]
    fn test_content_change_is_detected() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        make_tree(&a);
        make_tree(&b);
        std::fs::write(b.join("Contents/Info.plist"), "<plist version=\"2\"/>").unwrap();

        assert!(!trees_match(&a, &b).unwrap());
    }

    #[test]
    fn test_extra_empty_directory_is_detected() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        make_tree(&a);
        make_tree(&b);
        std::fs::create_dir_all(b.join("Contents/Resources")).unwrap();

        assert!(!trees_match(&a, &b).unwrap());
    }

    #[test]
    fn test_hash_directory_requires_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plugin.clap");
        std::fs::write(&file, "clap").unwrap();

        let err = hash_directory(&file).unwrap_err();
        assert!(matches!(err, DeployError::CopyFailed { .. }));
        assert!(err.to_string().contains("plugin.clap"));
    }

    #[test]
    fn test_single_files_are_compared_by_content() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.clap");
        let b = temp.path().join("b.clap");
        std::fs::write(&a, "build 1").unwrap();
        std::fs::write(&b, "build 1").unwrap();
        assert!(trees_match(&a, &b).unwrap());

        std::fs::write(&b, "build 2").unwrap();
        assert!(!trees_match(&a, &b).unwrap());
    }

    #[test]
    fn test_file_never_matches_directory() {
        let temp = TempDir::new().unwrap();
        make_tree(&temp.path().join("bundle"));
        let file = temp.path().join("bundle.vst3");
        std::fs::write(&file, "").unwrap();

        assert!(!trees_match(&temp.path().join("bundle"), &file).unwrap());
    }
}
