//! Query engine for the xref term index.
//!
//! Resolves batches of term queries against an [`xref_index::IndexStore`] snapshot,
//! applying spec fallback chains, type and owner filters, spec status preferences and
//! latest-version selection. Per-query results and whole responses are memoized in
//! [`TtlCache`]s that are discarded whenever the index is replaced.
//!
//! # Example
//!
//! ```
//! use xref_index::XrefIndex;
//! use xref_search::{Options, Query, SearchDefaults, Searcher};
//!
//! let searcher = Searcher::from_index(XrefIndex::default(), SearchDefaults::default());
//! let response = searcher
//!     .search(vec![Query::term("html")], &Options::default())
//!     .unwrap();
//! assert_eq!(response.result[0].0, "e65068091bad3c383def394a09acbebf591b4f58");
//! assert!(response.result[0].1.is_empty());
//! ```

#![warn(missing_docs)]

mod cache;
mod engine;
mod error;
mod filter;
mod project;
mod query;
mod stem;

pub use cache::TtlCache;
pub use engine::{SearchDefaults, Searcher};
pub use error::QueryError;
pub use filter::{filter_by_specs, matches_for, matches_types, prefer_latest_version, prefer_status};
pub use project::ProjectedEntry;
pub use query::{Field, Options, Query, Request, Response, SpecType, TypeFilter};
pub use stem::variations;
