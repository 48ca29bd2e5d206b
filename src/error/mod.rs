//! Error types and handling for bundle-deploy
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants fall into three classes, each with constructor helpers in a
//! sub-module:
//! - [`fs`]: file system errors (remove, copy, verify)
//! - [`launch`]: application launch errors
//! - [`config`]: configuration file errors

pub mod config;
pub mod fs;
pub mod launch;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deployment operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeployError {
    // File system errors
    #[error("Source bundle not found: {path}")]
    #[diagnostic(
        code(bundle_deploy::fs::source_not_found),
        help("Build and bundle the plugin first, or point --source at the built bundle")
    )]
    SourceNotFound { path: String },

    #[error("Failed to remove '{path}': {reason}")]
    #[diagnostic(code(bundle_deploy::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("Failed to copy '{path}': {reason}")]
    #[diagnostic(
        code(bundle_deploy::fs::copy_failed),
        help("Check that the destination directory is writable")
    )]
    CopyFailed { path: String, reason: String },

    #[error("Copied bundle at '{destination}' does not match '{source_path}'")]
    #[diagnostic(code(bundle_deploy::fs::verify_failed))]
    VerifyFailed {
        source_path: String,
        destination: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(bundle_deploy::fs::io_error))]
    IoError { message: String },

    // Launch errors
    #[error("Application executable not found: {path}")]
    #[diagnostic(
        code(bundle_deploy::launch::not_found),
        help("Point --app at the executable inside the application bundle")
    )]
    ExecutableNotFound { path: String },

    #[error("Not an executable file: {path}")]
    #[diagnostic(code(bundle_deploy::launch::not_executable))]
    NotExecutable { path: String },

    #[error("Failed to launch '{path}': {reason}")]
    #[diagnostic(code(bundle_deploy::launch::spawn_failed))]
    LaunchFailed { path: String, reason: String },

    #[error("Deployment finished with {failed} failed step(s)")]
    #[diagnostic(
        code(bundle_deploy::deploy::steps_failed),
        help("Run with -v for details on each step")
    )]
    StepsFailed { failed: usize },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(bundle_deploy::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(bundle_deploy::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(bundle_deploy::config::parse_failed),
        help("Expected keys: source_bundle_path, destination_bundle_path, application_executable_path")
    )]
    ConfigParseFailed { path: String, reason: String },
}

impl DeployError {
    /// True for errors raised while removing, copying or verifying bundles
    pub fn is_filesystem_error(&self) -> bool {
        matches!(
            self,
            DeployError::SourceNotFound { .. }
                | DeployError::RemoveFailed { .. }
                | DeployError::CopyFailed { .. }
                | DeployError::VerifyFailed { .. }
                | DeployError::IoError { .. }
        )
    }

    /// Short label for the error class, used in logs
    pub fn class(&self) -> &'static str {
        if self.is_filesystem_error() {
            "file system"
        } else if self.is_launch_error() {
            "launch"
        } else {
            "config"
        }
    }

    /// True for errors raised while starting the application
    pub fn is_launch_error(&self) -> bool {
        matches!(
            self,
            DeployError::ExecutableNotFound { .. }
                | DeployError::NotExecutable { .. }
                | DeployError::LaunchFailed { .. }
        )
    }
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DeployError {
    fn from(err: serde_yaml::Error) -> Self {
        DeployError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DeployError>;
