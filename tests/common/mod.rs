//! Common test utilities for bundle-deploy integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding source bundles, destinations and fake apps
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Absolute path of a workspace-relative path
    pub fn join(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Sorted relative paths of every entry below `path`
    #[allow(dead_code)]
    pub fn list_tree(&self, path: &str) -> Vec<String> {
        let root = self.path.join(path);
        let mut entries: Vec<String> = walk(&root)
            .into_iter()
            .map(|p| {
                p.strip_prefix(&root)
                    .expect("entry below root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        entries.sort();
        entries
    }

    /// Create a fake application executable that records its working
    /// directory in `<app dir>/launched_from` when started
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn create_fake_app(&self, path: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, "#!/bin/sh\npwd > launched_from\n");
        let app = self.join(path);
        std::fs::set_permissions(&app, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake app executable");
        app
    }

    /// Make a workspace directory read-only
    ///
    /// Returns false, with the directory writable again, when permissions
    /// are not enforced for the current user (running as root).
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn lock_dir(&self, path: &str) -> bool {
        use std::os::unix::fs::PermissionsExt;

        let dir = self.join(path);
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555))
            .expect("Failed to make directory read-only");
        let canary = dir.join(".write-check");
        if std::fs::write(&canary, "").is_ok() {
            std::fs::remove_file(&canary).expect("Failed to remove write check");
            self.unlock_dir(path);
            return false;
        }
        true
    }

    /// Make a directory locked with [`TestWorkspace::lock_dir`] writable again
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn unlock_dir(&self, path: &str) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(self.join(path), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make directory writable");
    }

    /// Wait for a file written by a detached child process
    #[allow(dead_code)]
    pub fn wait_for_file(&self, path: &str) -> Option<String> {
        for _ in 0..100 {
            if let Ok(content) = std::fs::read_to_string(self.join(path)) {
                if !content.is_empty() {
                    return Some(content);
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        None
    }

    /// bundle-deploy command isolated from the user's environment
    ///
    /// Runs inside the workspace, with no `BUNDLE_DEPLOY_*` variables and
    /// with the user config directory pointed into the workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = bundle_deploy_cmd();
        cmd.current_dir(&self.path)
            .env_remove("BUNDLE_DEPLOY_CONFIG")
            .env_remove("BUNDLE_DEPLOY_SOURCE")
            .env_remove("BUNDLE_DEPLOY_DESTINATION")
            .env_remove("BUNDLE_DEPLOY_APP")
            .env_remove("RUST_LOG")
            .env("HOME", self.path.join("home"))
            .env("XDG_CONFIG_HOME", self.path.join("home/.config"));
        cmd
    }

    /// bundle-deploy command with source `A`, destination `B` and app `App`
    #[allow(dead_code)]
    pub fn deploy_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--source")
            .arg(self.join("A"))
            .arg("--destination")
            .arg(self.join("B"))
            .arg("--app")
            .arg(self.join("App.app/Contents/MacOS/App"));
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn bundle_deploy_cmd() -> Command {
    Command::cargo_bin("bundle-deploy").expect("binary is built")
}

#[allow(dead_code)]
fn walk(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(entries) = std::fs::read_dir(root) else {
        return found;
    };
    for entry in entries {
        let path = entry.expect("readable entry").path();
        if path.is_dir() {
            found.extend(walk(&path));
        }
        found.push(path);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
        assert_eq!(
            workspace.list_tree("test"),
            vec!["file.txt".to_string()]
        );
    }
}
