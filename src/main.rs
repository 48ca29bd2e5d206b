//! bundle-deploy - plugin bundle deployment helper
//!
//! Deletes the installed audio plugin bundle, copies a freshly built bundle
//! into its place and starts the host application.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod hash;
mod launch;
mod logging;
mod operations;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Completions(args)) => commands::completions::run(args),
        None => commands::deploy::run(&cli),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
