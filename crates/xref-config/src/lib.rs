//! Configuration system for xref.
//!
//! xref uses TOML configuration files named `.xref.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.xref.toml` files
//! found, then loading `~/.xref.toml` as the global config with lowest precedence. The
//! `XREF_DATA_DIR` environment variable overrides the configured data directory.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
mod validate;

use std::{
    env,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{DEFAULT_DATA_DIR, ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawSearchSettings, RawSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_path;
use serde::{Deserialize, Serialize};
pub use templates::{TemplateSeed, global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Environment variable overriding `settings.data_dir`.
pub const DATA_DIR_ENV: &str = "XREF_DATA_DIR";

/// Top-level merged configuration for xref.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General settings.
    pub settings: Settings,
    /// Index input/output locations.
    pub index: IndexSettings,
    /// Query engine defaults.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.xref.toml` files,
    /// then applies the `XREF_DATA_DIR` override.
    ///
    /// Returns the defaults (data directory `./data`) if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        let config = Self::load_from_files(&config_files, cwd)?;
        config.with_data_dir_override(env::var(DATA_DIR_ENV).ok().as_deref(), cwd)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf], cwd: &Path) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed, cwd)
    }

    /// Replaces the data directory with `data_dir` (resolved against `cwd`) when present.
    pub fn with_data_dir_override(
        mut self,
        data_dir: Option<&str>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
            self.settings.data_dir = resolve_path(dir, cwd, DATA_DIR_ENV)?;
        }
        Ok(self)
    }

    /// Directory of line-delimited anchor dumps.
    pub fn anchors_dir(&self) -> PathBuf {
        self.settings.data_dir.join(&self.index.anchors_dir)
    }

    /// Spec metadata file.
    pub fn specs_file(&self) -> PathBuf {
        self.settings.data_dir.join(&self.index.specs_file)
    }

    /// Directory of structured definition lists, if configured.
    pub fn definitions_dir(&self) -> Option<PathBuf> {
        self.index
            .definitions_dir
            .as_ref()
            .map(|dir| self.settings.data_dir.join(dir))
    }

    /// Directory holding `xref.json`, `specs.json` and `specmap.json`.
    pub fn output_dir(&self) -> PathBuf {
        self.settings.data_dir.join(&self.index.output_dir)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            settings: &self.settings,
            index: &self.index,
            search: &self.search,
        };
        // Plain structs of strings, paths and integers always serialize.
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// General settings for xref.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Root directory for input data and index artifacts.
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Index input/output locations, relative to the data directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Directory of line-delimited anchor dumps.
    pub anchors_dir: String,
    /// Spec metadata file.
    pub specs_file: String,
    /// Directory of structured definition lists.
    pub definitions_dir: Option<String>,
    /// Directory the index artifacts are written to.
    pub output_dir: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            anchors_dir: String::from("bikeshed-data/data/anchors"),
            specs_file: String::from("bikeshed-data/data/specs.json"),
            definitions_dir: None,
            output_dir: String::from("xref"),
        }
    }
}

/// Defaults for the query engine.
///
/// Values are kept as strings here; the engine validates them when it is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Fields returned for each entry.
    pub fields: Vec<String>,
    /// Spec status preference, most preferred first.
    pub spec_type: Vec<String>,
    /// Type restriction applied when a query names no types.
    pub types: Vec<String>,
    /// Lifetime of cached query results, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fields: ["shortname", "spec", "type", "for", "normative", "uri"]
                .map(String::from)
                .to_vec(),
            spec_type: vec![String::from("draft"), String::from("official")],
            types: Vec::new(),
            cache_ttl_secs: 3 * 24 * 60 * 60,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// General settings.
    settings: &'a Settings,
    /// Index settings.
    index: &'a IndexSettings,
    /// Search settings.
    search: &'a SearchSettings,
}
