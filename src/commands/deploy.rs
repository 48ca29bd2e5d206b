//! Deploy command: the default when no subcommand is given

use console::Style;
use tracing::debug;

use crate::cli::Cli;
use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use crate::launch::ProcessLauncher;
use crate::operations::deploy::DeployReport;
use crate::operations::{DeployOperation, DeployOptions};

pub fn run(cli: &Cli) -> Result<()> {
    let config = DeployConfig::load(cli.config.as_deref(), cli.overrides())?;
    debug!(
        source = %config.source_bundle_path.display(),
        destination = %config.destination_bundle_path.display(),
        app = %config.application_executable_path.display(),
        "resolved configuration"
    );

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let operation = DeployOperation::new(config, DeployOptions::from(cli));
    let report = operation.execute(&mut std::io::stdout().lock(), &mut ProcessLauncher);

    let failed = print_failures(&report);
    if failed > 0 {
        return Err(DeployError::StepsFailed { failed });
    }
    Ok(())
}

/// Print each failed step on stderr and return how many failed
fn print_failures(report: &DeployReport) -> usize {
    let failures: Vec<_> = report.failures().collect();

    let red = Style::new().red().bold().for_stderr();
    let dim = Style::new().dim().for_stderr();
    for (step, err) in &failures {
        eprintln!("{} {} {}", red.apply_to("✗"), dim.apply_to(format!("[{step}]")), err);
    }
    failures.len()
}
