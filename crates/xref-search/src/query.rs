//! Request and response model for the query engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, formats::PreferMany, serde_as};
use sha1::{Digest, Sha1};
use xref_index::{DefType, SpecStatus};

use crate::ProjectedEntry;

/// One term lookup.
///
/// `specs` accepts either a list of alternative groups (`[["dom"], ["svg2"]]`) or a flat
/// list (`["html"]`), which is read as a single group.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Term to look up. Required; an empty string is a valid term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Caller-chosen identity; computed from the query when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Type restriction: type names, `_IDL_` or `_CONCEPT_`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Spec fallback chain; each group lists acceptable spec ids or shortnames.
    #[serde_as(as = "Option<OneOrMany<_, PreferMany>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Vec<Vec<String>>>,
    /// Owning interface or concept; the empty string selects context-free entries.
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_context: Option<String>,
}

impl Query {
    /// A query for `term` with no other constraints.
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    /// The stable identity of this query: SHA-1 of its compact JSON form with sorted keys,
    /// excluding any `id`.
    pub fn compute_id(&self) -> String {
        let canonical = Self {
            id: None,
            ..self.clone()
        };
        // serde_json's default map is ordered, so object keys come out sorted.
        let json = serde_json::to_value(&canonical)
            .map(|value| value.to_string())
            .unwrap_or_default();
        hex::encode(Sha1::digest(json.as_bytes()))
    }

    /// The caller's id, or the computed one.
    pub fn effective_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.compute_id())
    }
}

/// Fields an entry can be projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Definition type.
    Type,
    /// Spec id.
    Spec,
    /// Spec shortname.
    Shortname,
    /// Revision status.
    Status,
    /// Spec-relative URL.
    Uri,
    /// Normative flag.
    Normative,
    /// Owning interfaces or concepts.
    For,
}

impl Field {
    /// Default projection.
    pub const DEFAULTS: [Self; 6] = [
        Self::Shortname,
        Self::Spec,
        Self::Type,
        Self::For,
        Self::Normative,
        Self::Uri,
    ];

    /// The wire name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Spec => "spec",
            Self::Shortname => "shortname",
            Self::Status => "status",
            Self::Uri => "uri",
            Self::Normative => "normative",
            Self::For => "for",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Type,
            Self::Spec,
            Self::Shortname,
            Self::Status,
            Self::Uri,
            Self::Normative,
            Self::For,
        ]
        .into_iter()
        .find(|f| f.as_str() == s)
        .ok_or_else(|| s.to_string())
    }
}

/// A spec status preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecType {
    /// Prefer living standards and editor's drafts.
    Draft,
    /// Prefer published snapshots.
    Official,
    /// Same as `draft`.
    Current,
    /// Same as `official`.
    Snapshot,
}

impl SpecType {
    /// The entry status this preference selects.
    pub fn status(self) -> SpecStatus {
        match self {
            Self::Draft | Self::Current => SpecStatus::Current,
            Self::Official | Self::Snapshot => SpecStatus::Snapshot,
        }
    }
}

impl FromStr for SpecType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "official" => Ok(Self::Official),
            "current" => Ok(Self::Current),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(other.to_string()),
        }
    }
}

/// A parsed type restriction token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    /// A single definition type.
    Exact(DefType),
    /// Any IDL-like type (`_IDL_`).
    Idl,
    /// Any concept-like type (`_CONCEPT_`).
    Concept,
    /// An unrecognized token; matches nothing.
    Unknown(String),
}

impl TypeFilter {
    /// Parses a type token. Never fails; unknown tokens are kept as [`TypeFilter::Unknown`].
    pub fn parse(token: &str) -> Self {
        match token {
            "_IDL_" => Self::Idl,
            "_CONCEPT_" => Self::Concept,
            other => other
                .parse::<DefType>()
                .map_or_else(|_| Self::Unknown(other.to_string()), Self::Exact),
        }
    }

    /// Parses a list of tokens.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Vec<Self> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    /// Returns true if `def_type` satisfies this token.
    pub fn accepts(&self, def_type: DefType) -> bool {
        match self {
            Self::Exact(t) => *t == def_type,
            Self::Idl => def_type.is_idl(),
            Self::Concept => def_type.is_concept(),
            Self::Unknown(_) => false,
        }
    }

    /// Returns true for tokens that name IDL-like types.
    pub fn is_idl(&self) -> bool {
        match self {
            Self::Exact(t) => t.is_idl(),
            Self::Idl => true,
            Self::Concept | Self::Unknown(_) => false,
        }
    }

    /// Returns true for tokens that name concept-like types.
    pub fn is_concept(&self) -> bool {
        match self {
            Self::Exact(t) => t.is_concept(),
            Self::Concept => true,
            Self::Idl | Self::Unknown(_) => false,
        }
    }
}

/// Per-request options. Absent values fall back to the engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Fields to return for each entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    /// Spec status preference, most preferred first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_type: Option<Vec<SpecType>>,
    /// Type restriction for queries that name no types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Echo the queries, with ids filled in, in the response.
    pub query: bool,
    /// Memoize the whole response under this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Accepted for compatibility; the `for` filter only depends on the query.
    pub all: bool,
}

/// The request document: `{ "options": {...}, "keys": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Request options.
    pub options: Options,
    /// Queries, resolved in order.
    pub keys: Vec<Query>,
}

/// Results in query order, each paired with its query id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// `[id, entries]` pairs.
    pub result: Vec<(String, Vec<ProjectedEntry>)>,
    /// The queries with ids filled in, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<Query>>,
}
