//! Application launch errors

use std::path::Path;

use super::DeployError;

pub fn executable_not_found(path: &Path) -> DeployError {
    DeployError::ExecutableNotFound {
        path: path.display().to_string(),
    }
}

pub fn not_executable(path: &Path) -> DeployError {
    DeployError::NotExecutable {
        path: path.display().to_string(),
    }
}

pub fn launch_failed(path: &Path, err: &std::io::Error) -> DeployError {
    DeployError::LaunchFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
