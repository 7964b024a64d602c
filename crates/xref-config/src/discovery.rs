//! Locating `.xref.toml` files.
//!
//! Project configs are read from the working directory and each of its ancestors; the global
//! `~/.xref.toml` comes last. A config with `root = true` ends the search, global included.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".xref.toml";

/// Config files that apply in `cwd`, highest precedence first.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for path in cwd.ancestors().map(|dir| dir.join(CONFIG_FILENAME)) {
        if !path.is_file() {
            continue;
        }
        let root = is_root_config(&path);
        found.push(path);
        if root {
            return found;
        }
    }

    // The home directory is usually an ancestor, in which case its config is already listed.
    if let Some(global) = global_config_path().filter(|g| g.is_file() && !found.contains(g)) {
        found.push(global);
    }
    found
}

/// `~/.xref.toml`, or `None` when there is no home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global config file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
