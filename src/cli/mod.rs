//! CLI definitions using clap derive API
//!
//! Running without arguments deploys with the configured paths. Flags and
//! `BUNDLE_DEPLOY_*` environment variables override individual paths.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;

pub use completions::CompletionsArgs;

use crate::config::ConfigOverrides;

/// bundle-deploy - plugin bundle deployment helper
///
/// Replaces the installed plugin bundle with a fresh build, then opens the host application.
#[derive(Parser, Debug)]
#[command(
    name = "bundle-deploy",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Replace an installed audio plugin bundle with a fresh build and open the DAW",
    long_about = "Deletes the installed plugin bundle, copies the freshly built bundle into its \
                  place and starts the host application without waiting for it.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bundle-deploy                                  \x1b[90m# Deploy with configured paths\x1b[0m\n   \
                  bundle-deploy -s target/bundled/gain.vst3      \x1b[90m# Deploy another build\x1b[0m\n   \
                  bundle-deploy --no-launch --verify             \x1b[90m# Copy and check, do not open the DAW\x1b[0m\n   \
                  bundle-deploy -c deploy.yaml --fail-fast       \x1b[90m# Stop at the first failed step\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// YAML config file (defaults to ./bundle-deploy.yaml, then the user config dir)
    #[arg(long, short = 'c', value_name = "FILE", env = "BUNDLE_DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Freshly built plugin bundle to install
    #[arg(long, short = 's', value_name = "PATH", env = "BUNDLE_DEPLOY_SOURCE")]
    pub source: Option<PathBuf>,

    /// Installed plugin bundle to replace
    #[arg(long, short = 'd', value_name = "PATH", env = "BUNDLE_DEPLOY_DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Host application executable to start afterwards
    #[arg(long, short = 'a', value_name = "PATH", env = "BUNDLE_DEPLOY_APP")]
    pub app: Option<PathBuf>,

    /// Do not start the host application
    #[arg(long)]
    pub no_launch: bool,

    /// Stop at the first failed step instead of carrying on
    #[arg(long)]
    pub fail_fast: bool,

    /// Hash source and destination after copying and fail on mismatch
    #[arg(long)]
    pub verify: bool,

    /// Print the resolved configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Cli {
    /// Path overrides given on the command line or through the environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            source_bundle_path: self.source.clone(),
            destination_bundle_path: self.destination.clone(),
            application_executable_path: self.app.clone(),
        }
    }
}
