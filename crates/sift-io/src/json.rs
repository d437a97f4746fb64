//! JSON record persistence.
//!
//! Records are single JSON objects, one per file, pretty-printed on
//! write. Parameter files may be split across several files; later
//! files shallow-merge over earlier ones, key by key at the top level.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::IoError;

/// Read one file as a JSON object.
///
/// # Errors
///
/// [`IoError::NotFound`], [`IoError::NotAFile`], [`IoError::Io`], or
/// [`IoError::Parse`] (also raised when the top level is not an object).
pub fn read_value(path: &Path) -> Result<Value, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound {
            path: path.to_owned(),
        });
    }
    if !path.is_file() {
        return Err(IoError::NotAFile {
            path: path.to_owned(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.to_owned(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IoError::Parse {
        path: path.to_owned(),
        detail: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(IoError::Parse {
            path: path.to_owned(),
            detail: "expected a JSON object at the top level".to_owned(),
        });
    }
    debug!(path = %path.display(), "read json");
    Ok(value)
}

/// Read several files and shallow-merge them in order.
///
/// A key appearing in more than one file takes the value from the last
/// file that carries it.
///
/// # Errors
///
/// Whatever [`read_value`] returns for the first failing file.
pub fn read_merged<P: AsRef<Path>>(paths: &[P]) -> Result<Value, IoError> {
    let mut merged = Map::new();
    for path in paths {
        let value = read_value(path.as_ref())?;
        if let Value::Object(map) = value {
            for (key, val) in map {
                merged.insert(key, val);
            }
        }
    }
    Ok(Value::Object(merged))
}

/// Read and deserialize one record file.
///
/// # Errors
///
/// As [`read_value`]; a schema mismatch reports as [`IoError::Parse`].
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let value = read_value(path)?;
    serde_json::from_value(value).map_err(|e| IoError::Parse {
        path: path.to_owned(),
        detail: e.to_string(),
    })
}

/// Serialize one record to a file, pretty-printed.
///
/// An existing regular file is refused unless `overwrite` is set.
///
/// # Errors
///
/// [`IoError::AlreadyExists`] or [`IoError::Io`].
pub fn write_record<T: Serialize>(path: &Path, record: &T, overwrite: bool) -> Result<(), IoError> {
    if !overwrite && path.is_file() {
        return Err(IoError::AlreadyExists {
            path: path.to_owned(),
        });
    }
    let mut text = serde_json::to_string_pretty(record).map_err(|e| IoError::Parse {
        path: path.to_owned(),
        detail: e.to_string(),
    })?;
    text.push('\n');
    fs::write(path, text).map_err(|source| IoError::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}
