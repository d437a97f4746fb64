//! The `predict` command: advance one member through the system model.

use std::path::PathBuf;

use tracing::info;

use sift_core::State;
use sift_io::{load_params, load_record, state_filename, write_record, PredictParamFile};
use sift_model::ModelSource;

use crate::cli::PredictArgs;
use crate::commands::{ensure_output_dir, load_model};
use crate::error::CliError;

/// Run `sift predict`, returning the file written.
pub fn run(args: &PredictArgs, source: &dyn ModelSource) -> Result<Vec<PathBuf>, CliError> {
    let params = load_params::<PredictParamFile>(&args.param)?.into_params()?;
    let mut state: State = load_record(&args.state)?;

    let mut model = load_model(source, &args.model, args.model_option.as_deref())?;
    sift_engine::predict::advance(&params, &mut state, &mut *model)?;

    ensure_output_dir(&args.output)?;
    info!(id = state.id, sys_tim = state.sys_tim, "writing predicted state");
    let path = args.output.join(state_filename(&state));
    write_record(&path, &state, args.force)?;
    Ok(vec![path])
}
