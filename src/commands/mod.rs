//! Command implementations for the bundle-deploy CLI

pub mod completions;
pub mod deploy;
