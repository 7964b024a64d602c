//! Discovery of indexing inputs.

use std::{
    ffi::OsStr,
    iter,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;
use xref_config::Config;

use crate::IndexError;

/// The files an indexing run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    /// Spec metadata file.
    pub specs_file: PathBuf,
    /// Anchor dumps, sorted by file name.
    pub anchors: Vec<PathBuf>,
    /// Definition lists, sorted by file name.
    pub definitions: Vec<PathBuf>,
}

impl InputFiles {
    /// Every input file in processing order, spec metadata first.
    pub fn all(&self) -> impl Iterator<Item = &Path> {
        iter::once(self.specs_file.as_path())
            .chain(self.anchors.iter().map(PathBuf::as_path))
            .chain(self.definitions.iter().map(PathBuf::as_path))
    }

    /// Number of record-bearing files (anchors and definitions).
    pub fn record_file_count(&self) -> usize {
        self.anchors.len() + self.definitions.len()
    }
}

/// Locates the inputs named by `config`.
///
/// The spec metadata file and anchors directory must exist; a configured definitions
/// directory must exist too.
pub fn discover_inputs(config: &Config) -> Result<InputFiles, IndexError> {
    let specs_file = config.specs_file();
    if !specs_file.is_file() {
        return Err(IndexError::MissingInput { path: specs_file });
    }

    let anchors = list_files(&config.anchors_dir(), None)?;
    let definitions = match config.definitions_dir() {
        Some(dir) => list_files(&dir, Some("json"))?,
        None => Vec::new(),
    };

    Ok(InputFiles {
        specs_file,
        anchors,
        definitions,
    })
}

/// Lists the non-hidden regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>, IndexError> {
    if !dir.is_dir() {
        return Err(IndexError::MissingInput {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| IndexError::Io(e.into()))?;
        if !entry.file_type().is_file() || is_hidden(entry.file_name()) {
            continue;
        }
        if let Some(ext) = extension
            && entry.path().extension().and_then(OsStr::to_str) != Some(ext)
        {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Returns true for dotfiles.
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
