//! Index construction from raw definition records.
//!
//! The [`IndexBuilder`] normalizes records into [`DefinitionEntry`] values, strips base
//! URLs with a [`PrefixResolver`], registers argument-less aliases for methods, and
//! accumulates the by-term and by-spec maps. Unresolvable URLs are collected across all
//! batches and reported together by [`IndexBuilder::finish`].

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
    BySpec, ByTerm, DefType, DefinitionEntry, IndexError, PrefixResolver, RawRecord, SpecEntry,
    SpecMap, SpecStatus, XrefIndex,
};

/// Counters accumulated while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Raw records seen.
    pub records_read: usize,
    /// Records dropped as unexported or of an unsupported type.
    pub records_dropped: usize,
    /// Records identical to one already indexed under the same key.
    pub duplicates: usize,
    /// Entries added under their own key.
    pub entries_added: usize,
    /// Entries added under a method alias key.
    pub aliases_added: usize,
}

/// Accumulates raw records into an [`XrefIndex`].
pub struct IndexBuilder {
    /// Base URL matcher.
    resolver: PrefixResolver,
    /// Definitions by term key.
    by_term: ByTerm,
    /// Definitions by shortname.
    by_spec: BySpec,
    /// Every (key, entry) pair indexed so far.
    seen: HashSet<(String, DefinitionEntry)>,
    /// URLs that matched no base URL, in encounter order.
    unresolved: Vec<String>,
    /// Guards `unresolved` against repeats.
    unresolved_seen: HashSet<String>,
    /// Running counters.
    stats: BuildStats,
}

impl IndexBuilder {
    /// Creates a builder that strips base URLs known to `resolver`.
    pub fn new(resolver: PrefixResolver) -> Self {
        Self {
            resolver,
            by_term: ByTerm::new(),
            by_spec: BySpec::new(),
            seen: HashSet::new(),
            unresolved: Vec::new(),
            unresolved_seen: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    /// Adds one batch of records, typically the contents of one input file.
    ///
    /// Returns the number of entries (aliases included) the batch added.
    pub fn add_batch(&mut self, records: &[RawRecord]) -> usize {
        let before = self.stats.entries_added + self.stats.aliases_added;
        for record in records {
            self.add_record(record);
        }
        let added = self.stats.entries_added + self.stats.aliases_added - before;
        debug!(records = records.len(), added, "indexed batch");
        added
    }

    /// Processes one record.
    fn add_record(&mut self, record: &RawRecord) {
        self.stats.records_read += 1;

        let resolved = self.resolver.resolve(&record.url);
        if !resolved.matched && self.unresolved_seen.insert(record.url.clone()) {
            self.unresolved.push(record.url.clone());
        }
        let uri = resolved.relative.to_string();

        let Ok(def_type) = record.def_type.parse::<DefType>() else {
            self.stats.records_dropped += 1;
            return;
        };
        if !record.exported {
            self.stats.records_dropped += 1;
            return;
        }
        let status = match record.status.parse::<SpecStatus>() {
            Ok(status) => status,
            Err(message) => {
                warn!(spec = %record.spec, term = %record.term, "{message}; record skipped");
                self.stats.records_dropped += 1;
                return;
            }
        };

        let key = normalize_key(&record.term, def_type);
        let entry = DefinitionEntry {
            def_type,
            spec: record.spec.clone(),
            shortname: record.shortname.clone(),
            status,
            uri,
            normative: record.normative,
            for_context: (!record.for_list.is_empty()).then(|| record.for_list.clone()),
        };

        let alias = method_alias(&key, def_type);

        if self.seen.insert((key.clone(), entry.clone())) {
            self.by_spec
                .entry(entry.shortname.clone())
                .or_default()
                .push(SpecEntry::from_definition(&key, &entry));
            self.by_term.entry(key).or_default().push(entry.clone());
            self.stats.entries_added += 1;
        } else {
            self.stats.duplicates += 1;
        }

        if let Some(alias) = alias
            && self.seen.insert((alias.clone(), entry.clone()))
        {
            self.by_term.entry(alias).or_default().push(entry);
            self.stats.aliases_added += 1;
        }
    }

    /// URLs that have failed resolution so far.
    pub fn unresolved_urls(&self) -> &[String] {
        &self.unresolved
    }

    /// Counters so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Completes the build.
    ///
    /// Fails with [`IndexError::UnresolvedUrls`] listing every URL that matched no base URL.
    pub fn finish(self, spec_map: SpecMap) -> Result<XrefIndex, IndexError> {
        if !self.unresolved.is_empty() {
            return Err(IndexError::UnresolvedUrls {
                urls: self.unresolved,
            });
        }
        Ok(XrefIndex {
            by_term: self.by_term,
            by_spec: self.by_spec,
            spec_map,
        })
    }
}

/// Normalizes a raw term into its index key.
///
/// Enum values lose their surrounding quotes; method keys always end in `()`.
pub fn normalize_key(term: &str, def_type: DefType) -> String {
    match def_type {
        DefType::EnumValue => {
            let term = term.strip_prefix('"').unwrap_or(term);
            term.strip_suffix('"').unwrap_or(term).to_string()
        }
        DefType::Method if !term.ends_with(')') => format!("{term}()"),
        _ => term.to_string(),
    }
}

/// The argument-less alias of a method key, if the key has arguments.
///
/// `add(value, key)` aliases to `add()`; `add()` has no alias.
pub fn method_alias(key: &str, def_type: DefType) -> Option<String> {
    if def_type != DefType::Method {
        return None;
    }
    let open = key.find('(')?;
    let args = key.get(open + 1..key.len().checked_sub(1)?)?;
    if args.trim().is_empty() {
        return None;
    }
    Some(format!("{}()", &key[..open]))
}
