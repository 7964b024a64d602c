//! Error types for the xref-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while building, writing or loading the term index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// One or more definition URLs matched no known specification base URL.
    ///
    /// Every offending URL of the run is listed; no artifacts are written.
    #[error("failed to resolve base url for {} definition url(s)", urls.len())]
    UnresolvedUrls {
        /// The URLs that failed prefix resolution, in encounter order.
        urls: Vec<String>,
    },

    /// A raw input record could not be parsed.
    #[error("malformed record in {source_name} (section {section}): {message}")]
    MalformedRecord {
        /// Name of the input the record came from.
        source_name: String,
        /// Zero-based index of the record within its input.
        section: usize,
        /// What was wrong with it.
        message: String,
    },

    /// A JSON input or artifact could not be parsed.
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Failed to serialize an index artifact.
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        /// Artifact name.
        name: &'static str,
        /// Underlying serialization error.
        source: serde_json::Error,
    },

    /// A required input file or directory does not exist.
    #[error("input not found: {path}")]
    MissingInput {
        /// The missing path.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Creates a `MalformedRecord` error.
    pub(crate) fn malformed(
        source_name: impl Into<String>,
        section: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            source_name: source_name.into(),
            section,
            message: message.into(),
        }
    }

    /// Returns true for failures that indicate corrupt input rather than an I/O problem.
    pub fn is_ingestion_fatal(&self) -> bool {
        matches!(self, Self::UnresolvedUrls { .. })
    }
}
