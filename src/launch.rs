//! Starting the host application
//!
//! The application is spawned directly, never through a shell, with its
//! working directory set to the directory holding the executable. The child
//! is not waited on: it outlives this process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{Result, launch as launch_error};

/// Something that can start an application executable
pub trait Launcher {
    /// Start `executable` and return without waiting for it to exit
    fn launch(&mut self, executable: &Path) -> Result<()>;
}

/// Launches applications as detached child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, executable: &Path) -> Result<()> {
        let executable = absolute_executable(executable)?;
        check_executable(&executable)?;

        let working_dir = working_dir_for(&executable);
        debug!(
            executable = %executable.display(),
            working_dir = %working_dir.display(),
            "spawning application"
        );

        let mut command = Command::new(&executable);
        command.current_dir(&working_dir).stdin(Stdio::null());
        detach(&mut command);

        let child = command
            .spawn()
            .map_err(|e| launch_error::launch_failed(&executable, &e))?;

        info!(pid = child.id(), executable = %executable.display(), "application started");
        // Dropping the handle neither kills nor waits for the child.
        drop(child);
        Ok(())
    }
}

/// Directory the application is started from
pub fn working_dir_for(executable: &Path) -> PathBuf {
    match executable.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Check that `path` names an existing, executable regular file
pub fn check_executable(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(launch_error::executable_not_found(path));
        }
        Err(e) => return Err(launch_error::launch_failed(path, &e)),
    };

    if !metadata.is_file() || !has_execute_bit(&metadata) {
        return Err(launch_error::not_executable(path));
    }

    Ok(())
}

// A relative program path combined with current_dir resolves differently per
// platform, so always hand Command an absolute path.
fn absolute_executable(executable: &Path) -> Result<PathBuf> {
    std::path::absolute(executable).map_err(|e| launch_error::launch_failed(executable, &e))
}

#[cfg(unix)]
fn has_execute_bit(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_execute_bit(_metadata: &fs::Metadata) -> bool {
    true
}

/// Put the child in its own process group so a Ctrl-C in the terminal
/// that started the deploy does not take the application down with it.
#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn detach(_command: &mut Command) {}
