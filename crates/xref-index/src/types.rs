//! Data model shared by the index builder and the query engine.

use std::{cmp::Ordering, collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Kind of definition an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefType {
    /// IDL attribute.
    Attribute,
    /// IDL callback.
    Callback,
    /// IDL dictionary member.
    DictMember,
    /// IDL dictionary.
    Dictionary,
    /// IDL enum value.
    EnumValue,
    /// IDL enum.
    Enum,
    /// IDL exception.
    Exception,
    /// IDL extended attribute.
    ExtendedAttribute,
    /// IDL interface.
    Interface,
    /// IDL operation.
    Method,
    /// IDL typedef.
    Typedef,
    /// Prose definition.
    Dfn,
    /// Markup element.
    Element,
    /// DOM event.
    Event,
}

/// The two closed families of definition types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Interface and API surface.
    Idl,
    /// Prose concepts.
    Concept,
}

impl DefType {
    /// Every supported type, IDL-like first.
    pub const ALL: [Self; 14] = [
        Self::Attribute,
        Self::Callback,
        Self::DictMember,
        Self::Dictionary,
        Self::EnumValue,
        Self::Enum,
        Self::Exception,
        Self::ExtendedAttribute,
        Self::Interface,
        Self::Method,
        Self::Typedef,
        Self::Dfn,
        Self::Element,
        Self::Event,
    ];

    /// The wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Callback => "callback",
            Self::DictMember => "dict-member",
            Self::Dictionary => "dictionary",
            Self::EnumValue => "enum-value",
            Self::Enum => "enum",
            Self::Exception => "exception",
            Self::ExtendedAttribute => "extended-attribute",
            Self::Interface => "interface",
            Self::Method => "method",
            Self::Typedef => "typedef",
            Self::Dfn => "dfn",
            Self::Element => "element",
            Self::Event => "event",
        }
    }

    /// The family this type belongs to.
    pub fn class(self) -> TypeClass {
        match self {
            Self::Dfn | Self::Element | Self::Event => TypeClass::Concept,
            _ => TypeClass::Idl,
        }
    }

    /// Returns true for IDL-like types.
    pub fn is_idl(self) -> bool {
        self.class() == TypeClass::Idl
    }

    /// Returns true for concept-like types.
    pub fn is_concept(self) -> bool {
        self.class() == TypeClass::Concept
    }
}

impl fmt::Display for DefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unsupported definition type: {s}"))
    }
}

/// Publication status of a specification revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    /// Living standard or editor's draft.
    Current,
    /// Dated, published revision.
    Snapshot,
}

impl SpecStatus {
    /// The wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for SpecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(format!("unknown spec status: {other}")),
        }
    }
}

/// One indexed definition, as stored under its term key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefinitionEntry {
    /// Kind of definition.
    #[serde(rename = "type")]
    pub def_type: DefType,
    /// Specification id, including level (`css-cascade-4`).
    pub spec: String,
    /// Specification family id (`css-cascade`).
    pub shortname: String,
    /// Revision status.
    pub status: SpecStatus,
    /// URL relative to the specification's base URL.
    pub uri: String,
    /// Whether the definition is normative.
    pub normative: bool,
    /// Owning interfaces or concepts; absent for context-free definitions.
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_context: Option<Vec<String>>,
}

impl DefinitionEntry {
    /// Returns true if `name` is one of this entry's owners.
    ///
    /// Concept-typed entries also accept a case-insensitive match.
    pub fn is_for(&self, name: &str) -> bool {
        let Some(owners) = &self.for_context else {
            return false;
        };
        if self.def_type.is_concept() {
            owners.iter().any(|o| o.eq_ignore_ascii_case(name))
        } else {
            owners.iter().any(|o| o == name)
        }
    }

    /// Numeric level suffix of `spec`; specs without one are level 0.
    pub fn spec_level(&self) -> SpecLevel<'_> {
        let digits = self
            .spec
            .bytes()
            .rev()
            .take_while(u8::is_ascii_digit)
            .count();
        SpecLevel(self.spec[self.spec.len() - digits..].trim_start_matches('0'))
    }
}

/// The trailing level of a spec id, compared numerically at any width.
///
/// Holds the significant digits only; level 0 is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecLevel<'a>(&'a str);

impl Ord for SpecLevel<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for SpecLevel<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SpecLevel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(self.0)
        }
    }
}

/// A definition as stored under its specification's shortname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    /// Term key the definition is indexed under.
    pub term: String,
    /// Kind of definition.
    #[serde(rename = "type")]
    pub def_type: DefType,
    /// Specification id.
    pub spec: String,
    /// Revision status.
    pub status: SpecStatus,
    /// URL relative to the specification's base URL.
    pub uri: String,
    /// Whether the definition is normative.
    pub normative: bool,
    /// Owning interfaces or concepts.
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_context: Option<Vec<String>>,
}

impl SpecEntry {
    /// Builds the by-spec form of an entry indexed under `term`.
    pub fn from_definition(term: &str, entry: &DefinitionEntry) -> Self {
        Self {
            term: term.to_string(),
            def_type: entry.def_type,
            spec: entry.spec.clone(),
            status: entry.status,
            uri: entry.uri.clone(),
            normative: entry.normative,
            for_context: entry.for_context.clone(),
        }
    }
}

/// Static metadata about one specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecInfo {
    /// Base URL (current if known, else snapshot).
    pub url: String,
    /// Specification family id.
    pub shortname: String,
    /// Human-readable title.
    pub title: String,
}

/// Term-keyed definitions.
pub type ByTerm = BTreeMap<String, Vec<DefinitionEntry>>;
/// Shortname-keyed definitions.
pub type BySpec = BTreeMap<String, Vec<SpecEntry>>;
/// Spec-id-keyed metadata.
pub type SpecMap = BTreeMap<String, SpecInfo>;

/// A complete, immutable snapshot of the three index artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XrefIndex {
    /// Definitions by term key.
    pub by_term: ByTerm,
    /// Definitions by specification shortname.
    pub by_spec: BySpec,
    /// Specification metadata by spec id.
    pub spec_map: SpecMap,
}

impl XrefIndex {
    /// Entries stored under `term`, or an empty slice.
    pub fn lookup(&self, term: &str) -> &[DefinitionEntry] {
        self.by_term.get(term).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `term` has at least one entry.
    pub fn contains(&self, term: &str) -> bool {
        !self.lookup(term).is_empty()
    }

    /// Number of distinct term keys.
    pub fn term_count(&self) -> usize {
        self.by_term.len()
    }

    /// Total number of by-term entries, aliases included.
    pub fn entry_count(&self) -> usize {
        self.by_term.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(def_type: DefType, spec: &str, for_context: Option<&[&str]>) -> DefinitionEntry {
        DefinitionEntry {
            def_type,
            spec: spec.to_string(),
            shortname: spec.trim_end_matches(|c: char| c.is_ascii_digit() || c == '-').to_string(),
            status: SpecStatus::Current,
            uri: "#x".to_string(),
            normative: true,
            for_context: for_context.map(|f| f.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn def_type_round_trips_wire_names() {
        for t in DefType::ALL {
            assert_eq!(t.as_str().parse::<DefType>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        assert!("heading".parse::<DefType>().is_err());
    }

    #[test]
    fn type_classes() {
        assert!(DefType::Method.is_idl());
        assert!(DefType::EnumValue.is_idl());
        assert!(DefType::Dfn.is_concept());
        assert!(DefType::Element.is_concept());
        assert!(DefType::Event.is_concept());
        assert!(!DefType::Event.is_idl());
    }

    #[test]
    fn entry_serializes_without_absent_for() {
        let e = entry(DefType::Dfn, "html", None);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r##"{"type":"dfn","spec":"html","shortname":"html","status":"current","uri":"#x","normative":true}"##
        );

        let e = entry(DefType::Attribute, "html", Some(&["Window"]));
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.ends_with(r#""for":["Window"]}"#));
    }

    #[test]
    fn spec_level_reads_trailing_digits() {
        let level = |spec: &str| entry(DefType::Dfn, spec, None).spec_level().to_string();
        assert_eq!(level("css-cascade-4"), "4");
        assert_eq!(level("css-cascade-3"), "3");
        assert_eq!(level("svg2"), "2");
        assert_eq!(level("html"), "0");
        assert_eq!(level("css-fonts-0"), "0");
        assert_eq!(level("x-007"), "7");
    }

    #[test]
    fn spec_levels_compare_beyond_u64() {
        let wide = entry(DefType::Dfn, "x-99999999999999999999", None);
        let narrow = entry(DefType::Dfn, "x-18446744073709551615", None);
        let small = entry(DefType::Dfn, "x-10", None);
        let padded = entry(DefType::Dfn, "x-0009", None);
        let none = entry(DefType::Dfn, "x", None);

        assert!(wide.spec_level() > narrow.spec_level());
        assert!(narrow.spec_level() > small.spec_level());
        assert!(small.spec_level() > padded.spec_level());
        assert!(padded.spec_level() > none.spec_level());
        assert_eq!(wide.spec_level().to_string(), "99999999999999999999");
    }

    #[test]
    fn is_for_respects_type_class() {
        let idl = entry(DefType::Attribute, "html", Some(&["Window"]));
        assert!(idl.is_for("Window"));
        assert!(!idl.is_for("window"));

        let concept = entry(DefType::Event, "html", Some(&["HTMLScriptElement"]));
        assert!(concept.is_for("htmlscriptelement"));

        let free = entry(DefType::Dfn, "html", None);
        assert!(!free.is_for("Window"));
    }

    #[test]
    fn lookup_missing_term_is_empty() {
        let index = XrefIndex::default();
        assert!(index.lookup("nope").is_empty());
        assert!(!index.contains("nope"));
        assert_eq!(index.entry_count(), 0);
    }
}
