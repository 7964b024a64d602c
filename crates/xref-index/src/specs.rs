//! Specification metadata: base URLs and the spec map.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde::Deserialize;

use crate::{IndexError, SpecInfo, SpecMap};

/// One entry of the spec metadata file.
#[derive(Debug, Deserialize)]
struct RawSpec {
    /// Editor's draft or living standard URL.
    #[serde(default)]
    current_url: Option<String>,
    /// Published snapshot URL.
    #[serde(default)]
    snapshot_url: Option<String>,
    /// Human-readable title.
    #[serde(default)]
    title: Option<String>,
    /// Specification family id.
    #[serde(default)]
    shortname: Option<String>,
}

/// Parsed specification metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecCatalog {
    /// Metadata by spec id.
    pub spec_map: SpecMap,
    /// Every known base URL, sorted and deduplicated.
    pub base_urls: Vec<String>,
}

/// Parses the spec metadata file. `path` is used for error reporting.
pub fn parse_spec_metadata(content: &str, path: &Path) -> Result<SpecCatalog, IndexError> {
    let raw: BTreeMap<String, RawSpec> =
        serde_json::from_str(content).map_err(|source| IndexError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut base_urls = BTreeSet::new();
    let mut spec_map = SpecMap::new();

    for (spec, entry) in raw {
        let current = entry.current_url.filter(|u| !u.is_empty());
        let snapshot = entry.snapshot_url.filter(|u| !u.is_empty());

        base_urls.extend(current.iter().cloned());
        base_urls.extend(snapshot.iter().cloned());

        let info = SpecInfo {
            url: current.or(snapshot).unwrap_or_default(),
            shortname: entry.shortname.unwrap_or_else(|| spec.clone()),
            title: entry.title.unwrap_or_default(),
        };
        spec_map.insert(spec, info);
    }

    Ok(SpecCatalog {
        spec_map,
        base_urls: base_urls.into_iter().collect(),
    })
}
