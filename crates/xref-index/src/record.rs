//! Raw definition records as read from input files, before normalization.

/// One definition occurrence from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Term as written in the input.
    pub term: String,
    /// Definition type name; may be a type the index does not support.
    pub def_type: String,
    /// Specification id.
    pub spec: String,
    /// Specification family id.
    pub shortname: String,
    /// Specification level, if the input records one.
    pub level: Option<String>,
    /// Revision status name.
    pub status: String,
    /// Absolute definition URL.
    pub url: String,
    /// Whether the definition is exported for cross-referencing.
    pub exported: bool,
    /// Whether the definition is normative.
    pub normative: bool,
    /// Owning interfaces or concepts.
    pub for_list: Vec<String>,
}
