//! The `obsgen` command: synthesize twin-experiment observations.

use std::path::PathBuf;

use tracing::info;

use sift_io::{load_params, obs_filename, write_record, ObsgenParamFile};
use sift_model::ModelSource;

use crate::cli::ObsgenArgs;
use crate::commands::{ensure_output_dir, load_model};
use crate::error::CliError;

/// Run `sift obsgen`, returning the files written.
pub fn run(args: &ObsgenArgs, source: &dyn ModelSource) -> Result<Vec<PathBuf>, CliError> {
    let params = load_params::<ObsgenParamFile>(&args.param)?.into_params()?;

    let mut model = load_model(source, &args.model, args.model_option.as_deref())?;
    let observations = sift_engine::obsgen::generate(&params, &mut *model)?;

    ensure_output_dir(&args.output)?;
    info!(count = observations.len(), "writing observations");

    let mut written = Vec::with_capacity(observations.len());
    for obs in &observations {
        let path = args.output.join(obs_filename(obs));
        write_record(&path, obs, args.force)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::registry_with;
    use sift_core::Observation;
    use sift_io::read_record;
    use sift_test_utils::ShiftModel;
    use std::fs;
    use std::path::Path;

    fn args(dir: &Path) -> ObsgenArgs {
        let param = dir.join("obsgen.json");
        fs::write(
            &param,
            r#"{"name": "twin", "seed": 1, "t": 2, "k": 2, "l": 1,
                "x0": [0.0, 5.0], "H": [0.0, 1.0]}"#,
        )
        .unwrap();
        ObsgenArgs {
            param: vec![param.to_str().unwrap().to_owned()],
            model: "shift".to_owned(),
            model_option: None,
            output: dir.join("out"),
            force: false,
        }
    }

    #[test]
    fn writes_one_observation_per_time() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry_with("shift", || Box::new(ShiftModel::new(1.0)));
        let written = run(&args(dir.path()), &registry).unwrap();

        assert_eq!(written.len(), 3);
        assert!(written[0].ends_with("twin_obs_000000.json"));
        assert!(written[2].ends_with("twin_obs_000002.json"));

        // H selects the second component; truth shifts by 1 per step.
        for (t, path) in written.iter().enumerate() {
            let obs: Observation = read_record(path).unwrap();
            assert_eq!(obs.obs_tim, t as i64);
            assert_eq!(obs.y, vec![5.0 + t as f64]);
        }
    }
}
