//! Path resolution for configured directories.
//!
//! Resolves relative and tilde-prefixed paths to absolute paths. Unlike the index
//! artifacts themselves, configured paths are not required to exist yet: `xref update`
//! creates the output directory on first run.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path against `base_dir`.
///
/// - Tilde paths (`~/data`) expand to the home directory
/// - Relative paths (`./data`, `data`) are joined onto `base_dir`
/// - Absolute paths are returned as-is
pub fn resolve_path(
    path: &str,
    base_dir: &Path,
    setting: &'static str,
) -> Result<PathBuf, ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::EmptyPath { setting });
    }

    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
