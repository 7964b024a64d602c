//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, SearchSettings, Settings,
    parse::{RawConfig, RawIndexSettings, RawSearchSettings},
    resolve::resolve_path,
};

/// Default data directory, relative to the winning config (or the working directory).
pub const DEFAULT_DATA_DIR: &str = "data";

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing this config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs are provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - `data_dir` is resolved relative to the directory of the file that defines it
/// - Without any `data_dir`, the default resolves against the winning config's directory,
///   or `cwd` when no config files exist
pub fn merge_configs(configs: &[ParsedConfig], cwd: &Path) -> Result<Config, ConfigError> {
    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    let data_dir = merge_data_dir(configs, config_root.as_deref().unwrap_or(cwd))?;
    let index = merge_index_settings(configs);
    let search = merge_search_settings(configs);

    Ok(Config {
        settings: Settings { data_dir },
        index,
        search,
        config_root,
    })
}

/// Finds the highest-precedence `data_dir` and resolves it.
fn merge_data_dir(configs: &[ParsedConfig], default_base: &Path) -> Result<PathBuf, ConfigError> {
    let defined = configs.iter().find_map(|parsed| {
        parsed
            .config
            .settings
            .as_ref()
            .and_then(|s| s.data_dir.as_deref())
            .map(|dir| (dir, parsed.dir()))
    });

    match defined {
        Some((dir, base)) => resolve_path(dir, base, "data_dir"),
        None => resolve_path(DEFAULT_DATA_DIR, default_base, "data_dir"),
    }
}

/// Merges index settings.
fn merge_index_settings(configs: &[ParsedConfig]) -> IndexSettings {
    let mut result = IndexSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref index) = parsed.config.index {
            apply_raw_index(&mut result, index);
        }
    }

    result
}

/// Applies raw index settings to result, overwriting any present values.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(ref v) = raw.anchors_dir {
        result.anchors_dir = v.clone();
    }
    if let Some(ref v) = raw.specs_file {
        result.specs_file = v.clone();
    }
    if let Some(ref v) = raw.definitions_dir {
        result.definitions_dir = Some(v.clone());
    }
    if let Some(ref v) = raw.output_dir {
        result.output_dir = v.clone();
    }
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.fields {
        result.fields = v.clone();
    }
    if let Some(ref v) = raw.spec_type {
        result.spec_type = v.clone();
    }
    if let Some(ref v) = raw.types {
        result.types = v.clone();
    }
    if let Some(v) = raw.cache_ttl_secs {
        result.cache_ttl_secs = v;
    }
}
