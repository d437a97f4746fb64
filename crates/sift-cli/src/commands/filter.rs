//! The `filter` command: assimilate one observation into the ensemble.

use std::path::PathBuf;

use tracing::info;

use sift_core::{Ensemble, Observation, State};
use sift_io::{expand_sequence, load_params, load_record, state_filename, write_record, FilterParamFile};

use crate::cli::FilterArgs;
use crate::commands::ensure_output_dir;
use crate::error::CliError;

/// Run `sift filter`, returning the files written.
pub fn run(args: &FilterArgs) -> Result<Vec<PathBuf>, CliError> {
    let params = load_params::<FilterParamFile>(&args.param)?.into_params()?;

    let state_files = expand_sequence(&args.state)?;
    let mut members = Vec::with_capacity(state_files.len());
    for path in &state_files {
        members.push(load_record::<State>(path)?);
    }
    let mut ensemble = Ensemble::from_members(members)?;
    let obs: Observation = load_record(&args.obs)?;

    sift_engine::analyse(&args.filter, &params, &mut ensemble, &obs)?;

    ensure_output_dir(&args.output)?;
    info!(
        members = ensemble.len(),
        obs_tim = obs.obs_tim,
        filter = %args.filter,
        "writing analysis ensemble"
    );

    let mut written = Vec::with_capacity(ensemble.len());
    for member in ensemble.members() {
        let path = args.output.join(state_filename(member));
        write_record(&path, member, args.force)?;
        written.push(path);
    }
    Ok(written)
}
