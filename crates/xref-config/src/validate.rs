//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The data directory does not exist.
    DataDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The anchor dump directory does not exist.
    AnchorsDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The spec metadata file does not exist.
    SpecsFileMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A definitions directory is configured but does not exist.
    DefinitionsDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// Query results would never be served from cache.
    ZeroCacheTtl,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataDirMissing { path } => write!(f, "data directory does not exist: {path}"),
            Self::AnchorsDirMissing { path } => {
                write!(f, "anchors directory does not exist: {path}")
            }
            Self::SpecsFileMissing { path } => write!(f, "spec metadata file does not exist: {path}"),
            Self::DefinitionsDirMissing { path } => {
                write!(f, "definitions directory does not exist: {path}")
            }
            Self::ZeroCacheTtl => write!(f, "search.cache_ttl_secs is 0; query caching is disabled"),
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// A missing data directory suppresses the per-input checks beneath it.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.cache_ttl_secs == 0 {
        warnings.push(ConfigWarning::ZeroCacheTtl);
    }

    if !config.settings.data_dir.is_dir() {
        warnings.push(ConfigWarning::DataDirMissing {
            path: display(&config.settings.data_dir),
        });
        return warnings;
    }

    let anchors = config.anchors_dir();
    if !anchors.is_dir() {
        warnings.push(ConfigWarning::AnchorsDirMissing {
            path: display(&anchors),
        });
    }

    let specs = config.specs_file();
    if !specs.is_file() {
        warnings.push(ConfigWarning::SpecsFileMissing {
            path: display(&specs),
        });
    }

    if let Some(definitions) = config.definitions_dir()
        && !definitions.is_dir()
    {
        warnings.push(ConfigWarning::DefinitionsDirMissing {
            path: display(&definitions),
        });
    }

    warnings
}

/// Formats a path for a warning message.
fn display(path: &Path) -> String {
    path.display().to_string()
}
