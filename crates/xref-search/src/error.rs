//! Error types for the xref-search crate.

use thiserror::Error;
use xref_index::IndexError;

/// Errors that can occur when resolving queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A query in the batch has no `term`.
    #[error("query {index} is missing required field `term`")]
    MissingTerm {
        /// Position of the offending query in the batch.
        index: usize,
    },

    /// The request document could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    /// A configured default is not a recognized value.
    #[error("invalid search.{setting} value: {value:?}")]
    InvalidDefault {
        /// Setting name.
        setting: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The index could not be loaded.
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl QueryError {
    /// Returns true for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingTerm { .. } | Self::InvalidRequest(_))
    }
}
