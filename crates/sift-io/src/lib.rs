//! JSON persistence, filename conventions, and parameter schemas for
//! the Sift toolkit.
//!
//! Every record is one pretty-printed JSON object per file. Filenames
//! encode the experiment name and timestamps so an output directory is
//! self-describing, and ensemble-wide commands address their member
//! files through a single printf-style placeholder.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
pub mod filename;
pub mod json;
pub mod params;

pub use error::IoError;
pub use filename::{
    expand_sequence, obs_filename, state_filename, state_filename_with_id_placeholder,
};
pub use json::{read_merged, read_record, read_value, write_record};
pub use params::{
    load_params, load_record, FilterParamFile, InitParamFile, ObsgenParamFile, PredictParamFile,
};
