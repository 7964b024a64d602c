//! Parser for structured per-specification definition lists.
//!
//! ```json
//! {
//!   "spec": "dom",
//!   "shortname": "dom",
//!   "status": "current",
//!   "dfns": [
//!     {
//!       "href": "https://dom.spec.whatwg.org/#concept-event",
//!       "linkingText": ["event"],
//!       "type": "dfn",
//!       "for": [],
//!       "access": "public",
//!       "informative": false
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{IndexError, RawRecord};

/// A definition list for one specification.
#[derive(Debug, Deserialize)]
struct DefinitionList {
    /// Specification id.
    spec: String,
    /// Specification family id; defaults to the spec id.
    #[serde(default)]
    shortname: Option<String>,
    /// Revision status.
    #[serde(default = "default_status")]
    status: String,
    /// Specification level.
    #[serde(default)]
    level: Option<serde_json::Value>,
    /// The definitions.
    #[serde(default)]
    dfns: Vec<Definition>,
}

/// One definition; yields a record per linking text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Definition {
    /// Absolute definition URL.
    href: String,
    /// Terms that link to this definition.
    #[serde(default)]
    linking_text: Vec<String>,
    /// Definition type.
    #[serde(rename = "type")]
    def_type: String,
    /// Owning interfaces or concepts.
    #[serde(default, rename = "for")]
    for_list: Vec<String>,
    /// `public` for exported definitions.
    #[serde(default)]
    access: String,
    /// True for non-normative definitions.
    #[serde(default)]
    informative: bool,
}

/// Status used when a list does not name one.
fn default_status() -> String {
    String::from("current")
}

/// Parses one definition list. `path` is used for error reporting.
pub fn parse_definitions(content: &str, path: &Path) -> Result<Vec<RawRecord>, IndexError> {
    let list: DefinitionList =
        serde_json::from_str(content).map_err(|source| IndexError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let shortname = list.shortname.unwrap_or_else(|| list.spec.clone());
    let level = list.level.map(|level| match level {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });

    let records = list
        .dfns
        .iter()
        .flat_map(|dfn| {
            dfn.linking_text.iter().map(|text| RawRecord {
                term: text.clone(),
                def_type: dfn.def_type.clone(),
                spec: list.spec.clone(),
                shortname: shortname.clone(),
                level: level.clone(),
                status: list.status.clone(),
                url: dfn.href.clone(),
                exported: dfn.access == "public",
                normative: !dfn.informative,
                for_list: dfn.for_list.iter().filter(|f| !f.is_empty()).cloned().collect(),
            })
        })
        .collect();

    Ok(records)
}
