//! Term index construction and storage for xref.
//!
//! This crate turns raw per-specification definition dumps into the three index
//! artifacts the query engine serves from:
//! - `xref.json`: definitions by term key
//! - `specs.json`: definitions by specification shortname
//! - `specmap.json`: specification metadata by spec id
//!
//! It handles:
//! - Longest-prefix stripping of specification base URLs ([`PrefixResolver`])
//! - Parsing anchor dumps and structured definition lists into [`RawRecord`]s
//! - Normalization, deduplication and method aliasing ([`IndexBuilder`])
//! - Artifact I/O, input fingerprinting and status detection
//! - An [`IndexStore`] whose snapshot can be replaced atomically
//!
//! # Example
//!
//! ```
//! use xref_index::{IndexBuilder, PrefixResolver, RawRecord, SpecMap};
//!
//! let resolver = PrefixResolver::new(["https://dom.spec.whatwg.org/"]);
//! let mut builder = IndexBuilder::new(resolver);
//! builder.add_batch(&[RawRecord {
//!     term: "event".to_string(),
//!     def_type: "dfn".to_string(),
//!     spec: "dom".to_string(),
//!     shortname: "dom".to_string(),
//!     level: None,
//!     status: "current".to_string(),
//!     url: "https://dom.spec.whatwg.org/#concept-event".to_string(),
//!     exported: true,
//!     normative: true,
//!     for_list: Vec::new(),
//! }]);
//! let index = builder.finish(SpecMap::new()).unwrap();
//! assert_eq!(index.lookup("event")[0].uri, "#concept-event");
//! ```

#![warn(missing_docs)]

mod anchors;
mod artifacts;
mod builder;
mod definitions;
mod error;
mod fingerprint;
mod indexer;
mod inputs;
mod location;
mod record;
mod specs;
mod status;
mod store;
mod trie;
mod types;

pub use anchors::parse_anchors;
pub use artifacts::{artifacts_exist, load_index, write_artifacts};
pub use builder::{BuildStats, IndexBuilder, method_alias, normalize_key};
pub use definitions::parse_definitions;
pub use error::IndexError;
pub use fingerprint::{
    FORMAT_VERSION, compute_fingerprint, read_stored_fingerprint, write_fingerprint,
};
pub use indexer::{IndexStats, Indexer, ProgressReporter, SilentReporter};
pub use inputs::{InputFiles, discover_inputs};
pub use location::{
    BY_SPEC_FILE, BY_TERM_FILE, SPEC_MAP_FILE, by_spec_path, by_term_path, fingerprint_path,
    index_directory, spec_map_path,
};
pub use record::RawRecord;
pub use specs::{SpecCatalog, parse_spec_metadata};
pub use status::{IndexStatus, detect_index_status};
pub use store::IndexStore;
pub use trie::{PrefixResolver, Resolved};
pub use types::{
    BySpec, ByTerm, DefType, DefinitionEntry, SpecEntry, SpecInfo, SpecLevel, SpecMap, SpecStatus,
    TypeClass, XrefIndex,
};
