//! The query engine.
//!
//! A [`Searcher`] resolves batches of [`Query`]s against the current index snapshot:
//!
//! 1. A query without an id gets one computed from its content
//! 2. A live cache entry for the id (and, for untyped queries, the request's default
//!    types) short-circuits steps 3 to 5
//! 3. The term is lowercased when the query's types are exclusively concept-like, and
//!    concept lookups that miss fall back to alternate spellings
//! 4. The spec fallback chain, type and owner filters narrow the entries
//! 5. The filtered entries are cached under the id
//! 6. Status and version preferences pick among the survivors, and the result is projected
//!
//! Step 6 runs on every call because it depends on per-request options. Cached values
//! carry the index generation they were computed from and are ignored once the index
//! has been replaced.

use std::{sync::Arc, time::Duration};

use tracing::{debug, info};
use xref_config::{Config, SearchSettings};
use xref_index::{DefinitionEntry, IndexStore, XrefIndex, index_directory};

use crate::{
    Field, Options, ProjectedEntry, Query, QueryError, Request, Response, SpecType, TtlCache,
    TypeFilter,
    filter::{filter_by_specs, matches_for, matches_types, prefer_latest_version, prefer_status},
    stem::variations,
};

/// Literal written by callers to mean the empty term.
const QUOTED_EMPTY: &str = "\"\"";

/// Engine-wide defaults, used when a request leaves an option unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    /// Fields returned for each entry.
    pub fields: Vec<Field>,
    /// Spec status preference.
    pub spec_type: Vec<SpecType>,
    /// Type restriction for queries that name no types.
    pub types: Vec<String>,
    /// Lifetime of cached results.
    pub cache_ttl: Duration,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            fields: Field::DEFAULTS.to_vec(),
            spec_type: vec![SpecType::Draft, SpecType::Official],
            types: Vec::new(),
            cache_ttl: Duration::from_secs(3 * 24 * 60 * 60),
        }
    }
}

impl SearchDefaults {
    /// Validates configured search settings.
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, QueryError> {
        let fields = settings
            .fields
            .iter()
            .map(|f| {
                f.parse::<Field>().map_err(|value| QueryError::InvalidDefault {
                    setting: "fields",
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let spec_type = settings
            .spec_type
            .iter()
            .map(|s| {
                s.parse::<SpecType>().map_err(|value| QueryError::InvalidDefault {
                    setting: "spec_type",
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fields,
            spec_type,
            types: settings.types.clone(),
            cache_ttl: Duration::from_secs(settings.cache_ttl_secs),
        })
    }
}

/// A cached value and the index generation it was computed from.
#[derive(Debug, Clone)]
struct Stamped<V> {
    /// Generation of the snapshot the value was computed from.
    generation: u64,
    /// Cached value.
    value: V,
}

/// Resolves queries against an [`IndexStore`], memoizing per-query and per-response results.
pub struct Searcher {
    /// Current index.
    store: IndexStore,
    /// Defaults for unset options.
    defaults: SearchDefaults,
    /// Filtered entries by query cache key.
    query_cache: TtlCache<String, Stamped<Arc<Vec<DefinitionEntry>>>>,
    /// Whole responses by `options.id`.
    response_cache: TtlCache<String, Stamped<Response>>,
}

impl Searcher {
    /// Creates a searcher over `store`.
    pub fn new(store: IndexStore, defaults: SearchDefaults) -> Self {
        let ttl = defaults.cache_ttl;
        Self {
            store,
            defaults,
            query_cache: TtlCache::new(ttl),
            response_cache: TtlCache::new(ttl),
        }
    }

    /// Creates a searcher over an in-memory index.
    pub fn from_index(index: XrefIndex, defaults: SearchDefaults) -> Self {
        Self::new(IndexStore::new(index), defaults)
    }

    /// Opens the index artifacts named by `config` with its search defaults.
    pub fn open(config: &Config) -> Result<Self, QueryError> {
        let defaults = SearchDefaults::from_settings(&config.search)?;
        let store = IndexStore::open(&index_directory(config))?;
        info!(terms = store.snapshot().term_count(), "opened index");
        Ok(Self::new(store, defaults))
    }

    /// Resolves a batch of queries.
    ///
    /// A query without a term fails the whole batch with [`QueryError::MissingTerm`].
    pub fn search(&self, queries: Vec<Query>, options: &Options) -> Result<Response, QueryError> {
        if let Some(id) = &options.id
            && let Some(cached) = self.cached(&self.response_cache, id)
        {
            debug!(%id, "response cache hit");
            return Ok(cached);
        }

        if let Some(index) = queries.iter().position(|q| q.term.is_none()) {
            return Err(QueryError::MissingTerm { index });
        }

        // Read before the snapshot: a stamp may be older than its data, never newer.
        let generation = self.store.generation();
        let index = self.store.snapshot();
        let fields: Arc<[Field]> = Arc::from(
            options
                .fields
                .as_deref()
                .unwrap_or(&self.defaults.fields),
        );
        let spec_type = options
            .spec_type
            .as_deref()
            .unwrap_or(&self.defaults.spec_type);
        let default_names = options.types.as_deref().unwrap_or(&self.defaults.types);
        let default_types = TypeFilter::parse_all(default_names);

        let mut result = Vec::with_capacity(queries.len());
        let mut echoed = Vec::with_capacity(if options.query { queries.len() } else { 0 });

        for mut query in queries {
            let id = query.effective_id();
            query.id = Some(id.clone());

            let key = cache_key(&id, &query, default_names);
            let filtered = match self.cached(&self.query_cache, &key) {
                Some(hit) => hit,
                None => self.filter_and_remember(key, generation, &index, &query, &default_types),
            };

            let preferred = prefer_status((*filtered).clone(), spec_type);
            let latest = prefer_latest_version(preferred);
            let projected = latest
                .into_iter()
                .map(|entry| ProjectedEntry::new(entry, Arc::clone(&fields)))
                .collect();
            result.push((id, projected));

            if options.query {
                echoed.push(query);
            }
        }

        let response = Response {
            result,
            query: options.query.then_some(echoed),
        };
        if let Some(id) = &options.id {
            self.response_cache.set(
                id.clone(),
                Stamped {
                    generation,
                    value: response.clone(),
                },
            );
        }
        Ok(response)
    }

    /// Resolves a `{ options, keys }` request document.
    pub fn handle(&self, request: Request) -> Result<Response, QueryError> {
        self.search(request.keys, &request.options)
    }

    /// Parses a JSON request document, resolves it and serializes the response.
    pub fn handle_json(&self, body: &str) -> Result<String, QueryError> {
        let request: Request = serde_json::from_str(body)?;
        let response = self.handle(request)?;
        Ok(serde_json::to_string(&response)?)
    }

    /// Replaces the index and discards every cached result.
    pub fn refresh(&self, index: XrefIndex) -> u64 {
        let generation = self.store.replace(index);
        self.reset_caches();
        generation
    }

    /// Reloads the index from disk and discards every cached result.
    ///
    /// On failure the current index and caches are kept.
    pub fn reload(&self) -> Result<u64, QueryError> {
        let generation = self.store.reload()?;
        self.reset_caches();
        Ok(generation)
    }

    /// Evicts expired cache entries and returns how many were removed.
    pub fn sweep(&self) -> usize {
        let removed = self.query_cache.sweep() + self.response_cache.sweep();
        debug!(removed, "swept caches");
        removed
    }

    /// The engine defaults.
    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }

    /// The underlying index store.
    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Returns a live cached value computed from the current index generation.
    fn cached<V: Clone>(&self, cache: &TtlCache<String, Stamped<V>>, key: &str) -> Option<V> {
        cache
            .get(key)
            .filter(|hit| hit.generation == self.store.generation())
            .map(|hit| hit.value)
    }

    /// Resolves `query` against `index` and caches the result under `key`, stamped with
    /// the generation `index` was read at.
    fn filter_and_remember(
        &self,
        key: String,
        generation: u64,
        index: &XrefIndex,
        query: &Query,
        default_types: &[TypeFilter],
    ) -> Arc<Vec<DefinitionEntry>> {
        let computed = Arc::new(resolve(index, query, default_types));
        self.query_cache.set(
            key,
            Stamped {
                generation,
                value: Arc::clone(&computed),
            },
        );
        computed
    }

    /// Clears both caches.
    fn reset_caches(&self) {
        self.query_cache.reset();
        self.response_cache.reset();
    }
}

/// The query cache key: the query id, plus the request's default types when the query
/// names no types of its own.
fn cache_key(id: &str, query: &Query, default_types: &[String]) -> String {
    let typed = query.types.as_deref().is_some_and(|t| !t.is_empty());
    if typed || default_types.is_empty() {
        id.to_string()
    } else {
        format!("{id}\n{}", default_types.join("\n"))
    }
}

/// Looks up and filters the entries for one query.
fn resolve(
    index: &XrefIndex,
    query: &Query,
    default_types: &[TypeFilter],
) -> Vec<DefinitionEntry> {
    let query_types = TypeFilter::parse_all(query.types.as_deref().unwrap_or_default());
    let concept = treat_as_concept(&query_types);

    let raw = query.term.as_deref().unwrap_or_default();
    let term = if raw == QUOTED_EMPTY {
        String::new()
    } else if concept {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };

    let mut entries = index.lookup(&term);
    if entries.is_empty()
        && concept
        && let Some(alt) = variations(&term).into_iter().find(|alt| index.contains(alt))
    {
        debug!(%term, %alt, "matched alternate spelling");
        entries = index.lookup(&alt);
    }

    let types = if query_types.is_empty() {
        default_types
    } else {
        query_types.as_slice()
    };
    let for_context = query.for_context.as_deref();

    filter_by_specs(entries, query.specs.as_deref())
        .into_iter()
        .filter(|e| matches_types(e, types) && matches_for(e, for_context))
        .cloned()
        .collect()
}

/// True when the types are non-empty and name only concept-like types.
fn treat_as_concept(types: &[TypeFilter]) -> bool {
    types.iter().any(TypeFilter::is_concept) && !types.iter().any(TypeFilter::is_idl)
}

#[cfg(test)]
mod tests {
    use xref_index::{DefType, SpecStatus};

    use super::*;

    fn index_with(uri: &str) -> XrefIndex {
        let mut index = XrefIndex::default();
        index.by_term.insert(
            "event".to_string(),
            vec![DefinitionEntry {
                def_type: DefType::Dfn,
                spec: "dom".to_string(),
                shortname: "dom".to_string(),
                status: SpecStatus::Current,
                uri: uri.to_string(),
                normative: true,
                for_context: None,
            }],
        );
        index
    }

    fn first_uri(response: &Response) -> &str {
        &response.result[0].1[0].entry.uri
    }

    #[test]
    fn cache_keys() {
        let plain = Query::term("marker");
        let id = plain.compute_id();
        assert_eq!(cache_key(&id, &plain, &[]), id);
        assert_ne!(cache_key(&id, &plain, &["dfn".to_string()]), id);
        assert_ne!(
            cache_key(&id, &plain, &["dfn".to_string()]),
            cache_key(&id, &plain, &["element".to_string()])
        );

        let typed = Query {
            types: Some(vec!["dfn".to_string()]),
            ..Query::term("marker")
        };
        assert_eq!(cache_key("x", &typed, &["element".to_string()]), "x");
    }

    #[test]
    fn results_computed_before_refresh_are_not_served_after_it() {
        let s = Searcher::from_index(index_with("#old"), SearchDefaults::default());
        let query = Query::term("event");
        let key = query.compute_id();

        // An in-flight search reads the old snapshot, then a refresh lands before it
        // stores its result.
        let generation = s.store.generation();
        let snapshot = s.store.snapshot();
        s.refresh(index_with("#new"));
        let stale = s.filter_and_remember(key, generation, &snapshot, &query, &[]);
        assert_eq!(stale[0].uri, "#old");

        let response = s.search(vec![query], &Options::default()).unwrap();
        assert_eq!(first_uri(&response), "#new");
    }

    #[test]
    fn responses_from_an_older_index_are_ignored() {
        let s = Searcher::from_index(index_with("#old"), SearchDefaults::default());
        let options = Options {
            id: Some("R".to_string()),
            ..Options::default()
        };
        let old = s.search(vec![Query::term("event")], &options).unwrap();
        assert_eq!(first_uri(&old), "#old");

        let generation = s.store.generation();
        s.refresh(index_with("#new"));
        s.response_cache.set(
            "R".to_string(),
            Stamped {
                generation,
                value: old,
            },
        );

        let fresh = s.search(vec![Query::term("event")], &options).unwrap();
        assert_eq!(first_uri(&fresh), "#new");
    }
}
