//! High-level operations driven by the CLI commands

pub mod deploy;

pub use deploy::{DeployOperation, DeployOptions};
