//! Reading and writing the three index artifacts.
//!
//! Artifacts are pretty-printed JSON with sorted keys, so identical input produces
//! byte-identical files. All three files are staged as temporary siblings before any of
//! them is renamed into place, so a failed write leaves the previous set untouched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    IndexError, XrefIndex,
    location::{
        BY_SPEC_FILE, BY_TERM_FILE, SPEC_MAP_FILE, by_spec_path, by_term_path, spec_map_path,
    },
};

/// Writes all three artifacts into `index_dir`, creating it if needed.
pub fn write_artifacts(index_dir: &Path, index: &XrefIndex) -> Result<(), IndexError> {
    let staged = [
        (by_term_path(index_dir), render(BY_TERM_FILE, &index.by_term)?),
        (by_spec_path(index_dir), render(BY_SPEC_FILE, &index.by_spec)?),
        (spec_map_path(index_dir), render(SPEC_MAP_FILE, &index.spec_map)?),
    ];

    fs::create_dir_all(index_dir)?;
    let mut temps = Vec::with_capacity(staged.len());
    for (path, contents) in &staged {
        let tmp = temp_path(path);
        if let Err(e) = fs::write(&tmp, contents) {
            discard(&temps);
            return Err(e.into());
        }
        temps.push(tmp);
    }

    for ((path, _), tmp) in staged.iter().zip(&temps) {
        fs::rename(tmp, path)?;
    }
    Ok(())
}

/// Loads all three artifacts from `index_dir`.
pub fn load_index(index_dir: &Path) -> Result<XrefIndex, IndexError> {
    let index = XrefIndex {
        by_term: read_json(&by_term_path(index_dir))?,
        by_spec: read_json(&by_spec_path(index_dir))?,
        spec_map: read_json(&spec_map_path(index_dir))?,
    };
    debug!(
        dir = %index_dir.display(),
        terms = index.term_count(),
        "loaded index"
    );
    Ok(index)
}

/// Returns true if all three artifacts are present.
pub fn artifacts_exist(index_dir: &Path) -> bool {
    by_term_path(index_dir).is_file()
        && by_spec_path(index_dir).is_file()
        && spec_map_path(index_dir).is_file()
}

/// Serializes one artifact.
fn render<T: Serialize>(name: &'static str, value: &T) -> Result<String, IndexError> {
    serde_json::to_string_pretty(value).map_err(|source| IndexError::Serialize { name, source })
}

/// The staging path for `path`.
fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Removes staged files after a failed write.
fn discard(temps: &[PathBuf]) {
    for tmp in temps {
        if let Err(e) = fs::remove_file(tmp) {
            debug!(path = %tmp.display(), error = %e, "could not remove staged artifact");
        }
    }
}

/// Parses the JSON file at `path`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IndexError> {
    if !path.is_file() {
        return Err(IndexError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| IndexError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
