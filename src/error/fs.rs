//! File system errors

use std::path::Path;

use super::DeployError;

/// Creates a source not found error
pub fn source_not_found(path: &Path) -> DeployError {
    DeployError::SourceNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a remove failed error
pub fn remove_failed(path: &Path, err: &std::io::Error) -> DeployError {
    DeployError::RemoveFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a copy failed error for the path that could not be read or written
pub fn copy_failed(path: &Path, reason: impl ToString) -> DeployError {
    DeployError::CopyFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a verify failed error
pub fn verify_failed(source: &Path, destination: &Path) -> DeployError {
    DeployError::VerifyFailed {
        source_path: source.display().to_string(),
        destination: destination.display().to_string(),
    }
}
