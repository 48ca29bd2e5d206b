//! Deploy operation module
//!
//! Replaces the installed plugin bundle with a fresh build and starts the
//! host application: remove → copy → launch, strictly in that order.
//!
//! A failed step does not stop the run unless fail-fast is enabled, so the
//! three progress lines always appear in order. Every outcome ends up in a
//! [`DeployReport`].

pub mod report;

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::common::fs as common_fs;
use crate::config::DeployConfig;
use crate::error::{Result, fs as fs_error};
use crate::hash;
use crate::launch::Launcher;

pub use report::{DeployReport, Step, StepOutcome};

/// Behavior switches for a deploy run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// Start the application after copying
    pub launch: bool,
    /// Stop at the first failed step
    pub fail_fast: bool,
    /// Hash source and destination after copying
    pub verify: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            launch: true,
            fail_fast: false,
            verify: false,
        }
    }
}

impl From<&Cli> for DeployOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            launch: !cli.no_launch,
            fail_fast: cli.fail_fast,
            verify: cli.verify,
        }
    }
}

/// High-level deploy operation
pub struct DeployOperation {
    config: DeployConfig,
    options: DeployOptions,
}

impl DeployOperation {
    pub fn new(config: DeployConfig, options: DeployOptions) -> Self {
        Self { config, options }
    }

    /// Run every step, writing progress lines to `out`
    pub fn execute<W: Write, L: Launcher>(&self, out: &mut W, launcher: &mut L) -> DeployReport {
        let mut report = DeployReport::default();

        for step in Step::ALL {
            if self.should_skip(step, &report) {
                debug!(%step, "skipping step");
                report.record(step, StepOutcome::Skipped);
                continue;
            }

            announce(out, step);

            let outcome = match self.run_step(step, launcher) {
                Ok(()) => StepOutcome::Done,
                Err(err) => {
                    warn!(%step, class = err.class(), error = %err, "step failed");
                    StepOutcome::Failed(err)
                }
            };
            report.record(step, outcome);
        }

        report
    }

    fn should_skip(&self, step: Step, report: &DeployReport) -> bool {
        if step == Step::Launch && !self.options.launch {
            return true;
        }
        self.options.fail_fast && !report.is_success()
    }

    fn run_step<L: Launcher>(&self, step: Step, launcher: &mut L) -> Result<()> {
        match step {
            Step::Remove => remove_destination(&self.config.destination_bundle_path).map(|_| ()),
            Step::Copy => copy_bundle(
                &self.config.source_bundle_path,
                &self.config.destination_bundle_path,
                self.options.verify,
            )
            .map(|_| ()),
            Step::Launch => launcher.launch(&self.config.application_executable_path),
        }
    }
}

/// Remove the installed bundle; a missing bundle is fine
pub fn remove_destination(destination: &Path) -> Result<bool> {
    let removed = common_fs::remove_path_if_exists(destination)?;
    if removed {
        info!(path = %destination.display(), "removed old bundle");
    } else {
        debug!(path = %destination.display(), "nothing to remove");
    }
    Ok(removed)
}

/// Copy the built bundle into place, optionally verifying the result
pub fn copy_bundle(source: &Path, destination: &Path, verify: bool) -> Result<u64> {
    let files = common_fs::copy_dir_recursive(source, destination)?;
    info!(
        source = %source.display(),
        destination = %destination.display(),
        files,
        "copied bundle"
    );

    if verify {
        if !hash::trees_match(source, destination)? {
            return Err(fs_error::verify_failed(source, destination));
        }
        debug!("copy verified");
    }

    Ok(files)
}

fn announce<W: Write>(out: &mut W, step: Step) {
    let written = writeln!(out, "{}", step.progress_message()).and_then(|()| out.flush());
    if let Err(e) = written {
        debug!(%step, error = %e, "could not write progress line");
    }
}
