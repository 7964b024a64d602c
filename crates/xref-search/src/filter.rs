//! Filters and tie-breaks applied to a term's entries.

use std::collections::HashMap;

use xref_index::DefinitionEntry;

use crate::{SpecType, TypeFilter};

/// Applies the spec fallback chain.
///
/// Returns the entries matching the first group (by spec id or shortname) that matches
/// anything; empty if no group matches. Empty groups are ignored, and without any
/// non-empty group every entry passes.
pub fn filter_by_specs<'a>(
    entries: &'a [DefinitionEntry],
    groups: Option<&[Vec<String>]>,
) -> Vec<&'a DefinitionEntry> {
    let Some(groups) = groups.filter(|gs| gs.iter().any(|g| !g.is_empty())) else {
        return entries.iter().collect();
    };

    groups
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| {
            entries
                .iter()
                .filter(|e| group.iter().any(|s| *s == e.spec || *s == e.shortname))
                .collect::<Vec<_>>()
        })
        .find(|matched| !matched.is_empty())
        .unwrap_or_default()
}

/// Returns true if `entry` satisfies any of `types`. An empty list accepts everything.
pub fn matches_types(entry: &DefinitionEntry, types: &[TypeFilter]) -> bool {
    types.is_empty() || types.iter().any(|t| t.accepts(entry.def_type))
}

/// Applies the owner filter.
///
/// An absent context accepts everything; an empty one accepts only context-free entries.
pub fn matches_for(entry: &DefinitionEntry, for_context: Option<&str>) -> bool {
    match for_context {
        None => true,
        Some("") => entry.for_context.is_none(),
        Some(name) => entry.is_for(name),
    }
}

/// Applies the spec status preference.
///
/// With one preference only matching entries remain. With two, the entries matching the
/// first are returned if there are any, and all entries otherwise.
pub fn prefer_status(
    entries: Vec<DefinitionEntry>,
    preference: &[SpecType],
) -> Vec<DefinitionEntry> {
    let Some(first) = preference.first() else {
        return entries;
    };
    let status = first.status();
    let preferred: Vec<DefinitionEntry> = entries
        .iter()
        .filter(|e| e.status == status)
        .cloned()
        .collect();

    if preference.len() == 1 || !preferred.is_empty() {
        preferred
    } else {
        entries
    }
}

/// Keeps one entry per `(shortname, uri)`: the one with the highest spec level.
///
/// Groups keep the position of their first entry; level ties keep the earlier entry.
pub fn prefer_latest_version(entries: Vec<DefinitionEntry>) -> Vec<DefinitionEntry> {
    if entries.len() <= 1 {
        return entries;
    }

    let mut slots: HashMap<(String, String), usize> = HashMap::new();
    let mut result: Vec<DefinitionEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = (entry.shortname.clone(), entry.uri.clone());
        match slots.get(&key) {
            Some(&slot) => {
                if entry.spec_level() > result[slot].spec_level() {
                    result[slot] = entry;
                }
            }
            None => {
                slots.insert(key, result.len());
                result.push(entry);
            }
        }
    }
    result
}
