//! Argument definitions for the `sift` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sequential data assimilation over JSON snapshots.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per assimilation operation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provide initial distribution.
    Init(InitArgs),
    /// Prediction step for an ensemble member.
    Predict(PredictArgs),
    /// Generate observation data for twin experiment.
    Obsgen(ObsgenArgs),
    /// Filter state vectors with observation data.
    Filter(FilterArgs),
}

#[derive(Debug, clap::Args)]
pub struct InitArgs {
    /// Input parameter json files; later files override earlier keys.
    #[arg(long, required = true, num_args = 1..)]
    pub param: Vec<String>,

    /// Output directory.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Args)]
pub struct PredictArgs {
    /// Input state json file.
    #[arg(long)]
    pub state: PathBuf,

    /// Input parameter json files; later files override earlier keys.
    #[arg(long, required = true, num_args = 1..)]
    pub param: Vec<String>,

    /// System model name or library path.
    #[arg(long)]
    pub model: String,

    /// Model option json file.
    #[arg(long)]
    pub model_option: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Args)]
pub struct ObsgenArgs {
    /// Input parameter json files; later files override earlier keys.
    #[arg(long, required = true, num_args = 1..)]
    pub param: Vec<String>,

    /// System model name or library path.
    #[arg(long)]
    pub model: String,

    /// Model option json file.
    #[arg(long)]
    pub model_option: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    /// Input state files: a filename or a pattern with one integer
    /// placeholder for the member id (e.g. run_%04d_000001_000000.json).
    #[arg(long)]
    pub state: String,

    /// Input parameter json files; later files override earlier keys.
    #[arg(long, required = true, num_args = 1..)]
    pub param: Vec<String>,

    /// Input observation json file.
    #[arg(long)]
    pub obs: PathBuf,

    /// Filter algorithm.
    #[arg(long, default_value = "enkf")]
    pub filter: String,

    /// Output directory.
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Overwrite existing files.
    #[arg(long)]
    pub force: bool,
}
