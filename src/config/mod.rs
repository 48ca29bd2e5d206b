//! Deployment configuration
//!
//! The three paths a deployment needs, layered from (later wins):
//! 1. built-in defaults
//! 2. a YAML config file
//! 3. command line flags and `BUNDLE_DEPLOY_*` environment variables

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, config as config_error};

/// Config file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "bundle-deploy.yaml";

/// Directory under the user config dir holding `config.yaml`
pub const USER_CONFIG_DIR_NAME: &str = "bundle-deploy";

/// Config file name inside [`USER_CONFIG_DIR_NAME`]
pub const USER_CONFIG_FILE_NAME: &str = "config.yaml";

pub const DEFAULT_SOURCE_BUNDLE_PATH: &str =
    "/Users/dogzone/dev/2023/audio/Midimon/target/bundled/midimon.vst3";
pub const DEFAULT_DESTINATION_BUNDLE_PATH: &str = "/Library/Audio/Plug-Ins/VST3/Dev/midimon.vst3";
pub const DEFAULT_APPLICATION_EXECUTABLE_PATH: &str = "/Applications/REAPER64.app/Contents/MacOS/REAPER";

/// Paths used by a deployment run
///
/// Every field is optional in YAML; missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Freshly built plugin bundle
    pub source_bundle_path: PathBuf,

    /// Installed plugin bundle, replaced on every run
    pub destination_bundle_path: PathBuf,

    /// Host application executable, started from its own directory
    pub application_executable_path: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            source_bundle_path: PathBuf::from(DEFAULT_SOURCE_BUNDLE_PATH),
            destination_bundle_path: PathBuf::from(DEFAULT_DESTINATION_BUNDLE_PATH),
            application_executable_path: PathBuf::from(DEFAULT_APPLICATION_EXECUTABLE_PATH),
        }
    }
}

/// Per-field overrides from the command line or environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub source_bundle_path: Option<PathBuf>,
    pub destination_bundle_path: Option<PathBuf>,
    pub application_executable_path: Option<PathBuf>,
}

impl DeployConfig {
    /// Parse configuration from YAML string
    #[cfg(test)]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(parse_yaml(yaml)?)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| config_error::read_failed(path, e.to_string()))?;

        parse_yaml(&content).map_err(|e| config_error::parse_failed(path, e.to_string()))
    }

    /// Replace every field that has an override
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.source_bundle_path {
            self.source_bundle_path = path;
        }
        if let Some(path) = overrides.destination_bundle_path {
            self.destination_bundle_path = path;
        }
        if let Some(path) = overrides.application_executable_path {
            self.application_executable_path = path;
        }
        self
    }

    /// Load configuration the way the CLI does
    ///
    /// Searches the current directory and the user config directory unless
    /// `explicit` names a file.
    pub fn load(explicit: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let user_dir = dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR_NAME));
        Self::resolve(explicit, &cwd, user_dir.as_deref(), overrides)
    }

    /// Layer defaults, the located config file and overrides
    pub fn resolve(
        explicit: Option<&Path>,
        search_dir: &Path,
        user_config_dir: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let base = match locate_config_file(explicit, search_dir, user_config_dir)? {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };

        Ok(base.with_overrides(overrides))
    }
}

fn parse_yaml(yaml: &str) -> std::result::Result<DeployConfig, serde_yaml::Error> {
    // An empty document deserializes as unit, not as an empty mapping
    if yaml.trim().is_empty() {
        return Ok(DeployConfig::default());
    }
    serde_yaml::from_str(yaml)
}

/// Find the config file to load
///
/// An explicit path must exist. Otherwise the first existing candidate of
/// `<search_dir>/bundle-deploy.yaml` and `<user_config_dir>/config.yaml`
/// wins, and `None` means "defaults only".
pub fn locate_config_file(
    explicit: Option<&Path>,
    search_dir: &Path,
    user_config_dir: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(config_error::not_found(path));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = search_dir.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(user_config_dir
        .map(|dir| dir.join(USER_CONFIG_FILE_NAME))
        .filter(|path| path.is_file()))
}
