//! The `init` command: draw and persist the initial ensemble.

use std::path::PathBuf;

use tracing::info;

use sift_io::{load_params, state_filename, write_record, InitParamFile};

use crate::cli::InitArgs;
use crate::commands::ensure_output_dir;
use crate::error::CliError;

/// Run `sift init`, returning the files written.
pub fn run(args: &InitArgs) -> Result<Vec<PathBuf>, CliError> {
    let params = load_params::<InitParamFile>(&args.param)?.into_params();
    let ensemble = sift_engine::init::draw(&params)?;

    ensure_output_dir(&args.output)?;
    info!(members = ensemble.len(), "writing initial ensemble");

    let mut written = Vec::with_capacity(ensemble.len());
    for member in ensemble.members() {
        let path = args.output.join(state_filename(member));
        write_record(&path, member, args.force)?;
        written.push(path);
    }
    Ok(written)
}
