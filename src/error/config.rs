//! Configuration errors

use std::path::Path;

use super::DeployError;

/// Creates a config not found error
pub fn not_found(path: &Path) -> DeployError {
    DeployError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: &Path, reason: impl Into<String>) -> DeployError {
    DeployError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: &Path, reason: impl Into<String>) -> DeployError {
    DeployError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
