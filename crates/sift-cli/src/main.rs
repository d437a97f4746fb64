//! The `sift` binary.
//!
//! Thin dispatch over the command implementations: parse arguments,
//! initialize logging on stderr, run, print the written files on
//! stdout. Paths on stdout are the machine-readable interface driving
//! scripts chain on; everything diagnostic goes to stderr.

mod cli;
mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sift_model::DynamicLoader;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn run(command: &Command) -> Result<Vec<PathBuf>, CliError> {
    let loader = DynamicLoader::new();
    match command {
        Command::Init(args) => commands::init::run(args),
        Command::Predict(args) => commands::predict::run(args, &loader),
        Command::Obsgen(args) => commands::obsgen::run(args, &loader),
        Command::Filter(args) => commands::filter::run(args),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(written) => {
            for path in written {
                println!("result saved to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
