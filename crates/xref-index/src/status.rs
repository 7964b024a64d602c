//! Index status detection.

use xref_config::Config;

use crate::{
    artifacts::artifacts_exist,
    fingerprint::{compute_fingerprint, read_stored_fingerprint},
    inputs::discover_inputs,
    location::index_directory,
};

/// Status of the index artifacts relative to their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// Artifacts exist and were built from the current inputs.
    Current,
    /// Artifacts exist but the inputs have changed or cannot be read.
    Stale,
    /// No artifacts exist.
    Missing,
}

impl IndexStatus {
    /// Returns a human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Missing => "missing",
        }
    }

    /// Returns true if the index should be rebuilt.
    pub fn needs_update(&self) -> bool {
        !matches!(self, Self::Current)
    }
}

/// Determines the current status of the index.
pub fn detect_index_status(config: &Config) -> IndexStatus {
    let index_dir = index_directory(config);
    if !artifacts_exist(&index_dir) {
        return IndexStatus::Missing;
    }

    let current = discover_inputs(config).and_then(|inputs| compute_fingerprint(&inputs));
    match (current, read_stored_fingerprint(&index_dir)) {
        (Ok(current), Some(stored)) if current == stored => IndexStatus::Current,
        _ => IndexStatus::Stale,
    }
}
