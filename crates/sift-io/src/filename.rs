//! Record filename conventions and sequence-pattern expansion.
//!
//! State files are named `<name>_<id:04>_<sys_tim:06>_<obs_tim:06>.json`,
//! observation files `<name>_obs_<obs_tim:06>.json`. Commands that take
//! a whole ensemble accept a single printf-style integer placeholder
//! (`%d` or `%04d`) standing in for the member id and expand it against
//! the filesystem.

use std::path::{Path, PathBuf};

use sift_core::{Observation, State};

use crate::error::IoError;

/// Upper bound on sequence expansion; indices `0..10000`.
const MAX_SEQUENCE: usize = 10_000;

/// The canonical filename for one member state.
pub fn state_filename(state: &State) -> String {
    format!(
        "{}_{:04}_{:06}_{:06}.json",
        state.name, state.id, state.sys_tim, state.obs_tim
    )
}

/// The state filename with the id replaced by a `%04d` placeholder,
/// suitable as a `--state` pattern for the filter command.
pub fn state_filename_with_id_placeholder(state: &State) -> String {
    format!(
        "{}_%04d_{:06}_{:06}.json",
        state.name, state.sys_tim, state.obs_tim
    )
}

/// The canonical filename for one observation.
pub fn obs_filename(obs: &Observation) -> String {
    format!("{}_obs_{:06}.json", obs.name, obs.obs_tim)
}

/// One parsed `%d` / `%4d` / `%04d` placeholder: byte span in the
/// pattern, field width, and whether the width is zero-padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placeholder {
    start: usize,
    end: usize,
    width: usize,
    zero_pad: bool,
}

fn find_placeholders(pattern: &str) -> Vec<Placeholder> {
    let bytes = pattern.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let digits_start = i + 1;
        let mut j = digits_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'd' {
            let digits = &pattern[digits_start..j];
            found.push(Placeholder {
                start: i,
                end: j + 1,
                width: digits.parse().unwrap_or(0),
                zero_pad: digits.starts_with('0'),
            });
            i = j + 1;
        } else {
            // A bare '%' with no integer conversion is a literal.
            i += 1;
        }
    }
    found
}

fn render(pattern: &str, ph: &Placeholder, index: usize) -> String {
    let formatted = if ph.zero_pad {
        format!("{index:0width$}", width = ph.width)
    } else {
        format!("{index:width$}", width = ph.width)
    };
    format!(
        "{}{}{}",
        &pattern[..ph.start],
        formatted,
        &pattern[ph.end..]
    )
}

/// Expand a filename or single-placeholder pattern into existing files.
///
/// Without a placeholder the file itself must exist. With one
/// placeholder, indices `0..10000` are probed; the result is the
/// contiguous run of existing files starting at the first present
/// index. Gaps after the run end it, so a missing member is caught by
/// the downstream count check rather than silently skipped.
///
/// # Errors
///
/// [`IoError::BadPattern`] for more than one placeholder,
/// [`IoError::NotFound`] for a plain filename that does not exist,
/// [`IoError::NoMatch`] when no index matches at all.
pub fn expand_sequence(pattern: &str) -> Result<Vec<PathBuf>, IoError> {
    let placeholders = find_placeholders(pattern);
    match placeholders.len() {
        0 => {
            let path = PathBuf::from(pattern);
            if path.exists() {
                Ok(vec![path])
            } else {
                Err(IoError::NotFound { path })
            }
        }
        1 => {
            let ph = placeholders[0];
            let mut files = Vec::new();
            let mut index = 0;
            while index < MAX_SEQUENCE {
                if Path::new(&render(pattern, &ph, index)).exists() {
                    break;
                }
                index += 1;
            }
            while index < MAX_SEQUENCE {
                let candidate = render(pattern, &ph, index);
                if !Path::new(&candidate).exists() {
                    break;
                }
                files.push(PathBuf::from(candidate));
                index += 1;
            }
            if files.is_empty() {
                return Err(IoError::NoMatch {
                    pattern: pattern.to_owned(),
                });
            }
            Ok(files)
        }
        n => Err(IoError::BadPattern {
            pattern: pattern.to_owned(),
            placeholders: n,
        }),
    }
}
