//! Full indexing pipeline.
//!
//! The [`Indexer`] orchestrates the complete indexing flow:
//! 1. Locate the spec metadata, anchor dumps and definition lists
//! 2. Skip the run if the input fingerprint matches the stored one
//! 3. Build a [`PrefixResolver`] from the known base URLs
//! 4. Feed every input file to an [`IndexBuilder`] as one batch
//! 5. Write the three artifacts and the new fingerprint

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use xref_config::Config;

use crate::{
    IndexBuilder, IndexError, PrefixResolver, RawRecord,
    anchors::parse_anchors,
    artifacts::{artifacts_exist, write_artifacts},
    definitions::parse_definitions,
    fingerprint::{compute_fingerprint, read_stored_fingerprint, write_fingerprint},
    inputs::discover_inputs,
    location::index_directory,
    specs::parse_spec_metadata,
};

/// Statistics from an indexing run.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// True if the inputs were unchanged and nothing was rebuilt.
    pub skipped: bool,
    /// Number of record files processed.
    pub files_processed: usize,
    /// Number of raw records read.
    pub records_read: usize,
    /// Records dropped as unexported or unsupported.
    pub records_dropped: usize,
    /// Duplicate records ignored.
    pub duplicates: usize,
    /// Distinct term keys in the written index.
    pub terms: usize,
    /// By-term entries in the written index, aliases included.
    pub entries: usize,
    /// Specifications in the spec map.
    pub specs: usize,
}

/// Callback for reporting indexing progress.
pub trait ProgressReporter {
    /// Called when starting to process a file.
    fn on_file_start(&mut self, path: &Path, current: usize, total: usize);

    /// Called when a file has been added to the index.
    fn on_file_done(&mut self, path: &Path, records: usize);

    /// Called when indexing is complete.
    fn on_complete(&mut self, stats: &IndexStats);
}

/// A no-op progress reporter for silent indexing.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_file_start(&mut self, _path: &Path, _current: usize, _total: usize) {}
    fn on_file_done(&mut self, _path: &Path, _records: usize) {}
    fn on_complete(&mut self, _stats: &IndexStats) {}
}

/// Orchestrates the full indexing pipeline.
pub struct Indexer<'a> {
    /// The loaded configuration.
    config: &'a Config,
    /// Path to the index directory.
    index_dir: PathBuf,
}

impl<'a> Indexer<'a> {
    /// Creates a new indexer for the given configuration.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            index_dir: index_directory(config),
        }
    }

    /// Rebuilds the index from the configured inputs.
    ///
    /// Without `force`, returns early with [`IndexStats::skipped`] set when the inputs are
    /// unchanged since the last run. Nothing is written if any definition URL fails to
    /// resolve.
    pub fn update<R: ProgressReporter>(
        &self,
        reporter: &mut R,
        force: bool,
    ) -> Result<IndexStats, IndexError> {
        let inputs = discover_inputs(self.config)?;
        let fingerprint = compute_fingerprint(&inputs)?;

        if !force
            && artifacts_exist(&self.index_dir)
            && read_stored_fingerprint(&self.index_dir).as_deref() == Some(fingerprint.as_str())
        {
            info!("nothing to update");
            let stats = IndexStats {
                skipped: true,
                ..Default::default()
            };
            reporter.on_complete(&stats);
            return Ok(stats);
        }

        info!(path = %inputs.specs_file.display(), "reading spec metadata");
        let specs_json = fs::read_to_string(&inputs.specs_file)?;
        let catalog = parse_spec_metadata(&specs_json, &inputs.specs_file)?;
        let resolver = PrefixResolver::new(&catalog.base_urls);
        debug!(base_urls = resolver.len(), "built prefix resolver");

        let mut builder = IndexBuilder::new(resolver);
        let mut stats = IndexStats::default();

        let total = inputs.record_file_count();
        let files = inputs
            .anchors
            .iter()
            .map(|p| (p, InputKind::Anchors))
            .chain(inputs.definitions.iter().map(|p| (p, InputKind::Definitions)));

        info!(files = total, "processing input files");
        for (idx, (path, kind)) in files.enumerate() {
            reporter.on_file_start(path, idx + 1, total);
            let records = read_records(path, kind)?;
            builder.add_batch(&records);
            stats.files_processed += 1;
            reporter.on_file_done(path, records.len());
        }

        let build = builder.stats();
        let index = builder.finish(catalog.spec_map)?;

        write_artifacts(&self.index_dir, &index)?;
        write_fingerprint(&self.index_dir, &fingerprint)?;

        stats.records_read = build.records_read;
        stats.records_dropped = build.records_dropped;
        stats.duplicates = build.duplicates;
        stats.terms = index.term_count();
        stats.entries = index.entry_count();
        stats.specs = index.spec_map.len();
        info!(
            terms = stats.terms,
            entries = stats.entries,
            dir = %self.index_dir.display(),
            "wrote index"
        );

        reporter.on_complete(&stats);
        Ok(stats)
    }

    /// Returns the path to the index directory.
    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }
}

/// Format of a record-bearing input file.
#[derive(Debug, Clone, Copy)]
enum InputKind {
    /// Line-delimited anchor dump.
    Anchors,
    /// JSON definition list.
    Definitions,
}

/// Reads and parses one input file.
fn read_records(path: &Path, kind: InputKind) -> Result<Vec<RawRecord>, IndexError> {
    let content = fs::read_to_string(path)?;
    match kind {
        InputKind::Anchors => {
            let name = path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            parse_anchors(&content, &name)
        }
        InputKind::Definitions => parse_definitions(&content, path),
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use tempfile::TempDir;
    use xref_config::{IndexSettings, Settings};

    use super::*;
    use crate::{artifacts::load_index, location::by_term_path};

    /// Test reporter that records all events.
    #[derive(Default)]
    struct TestReporter {
        events: RefCell<Vec<String>>,
    }

    impl ProgressReporter for TestReporter {
        fn on_file_start(&mut self, path: &Path, current: usize, total: usize) {
            self.events.borrow_mut().push(format!(
                "start: {} ({}/{})",
                path.file_name().unwrap().to_string_lossy(),
                current,
                total
            ));
        }

        fn on_file_done(&mut self, path: &Path, records: usize) {
            self.events.borrow_mut().push(format!(
                "done: {} ({} records)",
                path.file_name().unwrap().to_string_lossy(),
                records
            ));
        }

        fn on_complete(&mut self, stats: &IndexStats) {
            self.events.borrow_mut().push(format!(
                "complete: {} files, skipped={}",
                stats.files_processed, stats.skipped
            ));
        }
    }

    const SPECS: &str = r#"{
        "dom": {
            "current_url": "https://dom.spec.whatwg.org/",
            "snapshot_url": null,
            "title": "DOM Standard",
            "shortname": "dom"
        },
        "html": {
            "current_url": "https://html.spec.whatwg.org/multipage/",
            "title": "HTML Standard",
            "shortname": "html"
        }
    }"#;

    const DOM_ANCHORS: &str = "\
event
dfn
dom
dom
1
current
https://dom.spec.whatwg.org/#concept-event
1
1
-
";

    const HTML_ANCHORS: &str = "\
event
attribute
html
html
1
current
https://html.spec.whatwg.org/multipage/nav-history-apis.html#dom-window-event
1
1
Window
-
";

    fn create_test_config(temp: &TempDir) -> Config {
        let config = Config {
            settings: Settings {
                data_dir: temp.path().to_path_buf(),
            },
            index: IndexSettings {
                anchors_dir: "anchors".to_string(),
                specs_file: "specs.json".to_string(),
                definitions_dir: None,
                output_dir: "xref".to_string(),
            },
            ..Default::default()
        };
        fs::create_dir_all(config.anchors_dir()).unwrap();
        fs::write(config.specs_file(), SPECS).unwrap();
        fs::write(config.anchors_dir().join("anchors-d.data"), DOM_ANCHORS).unwrap();
        fs::write(config.anchors_dir().join("anchors-h.data"), HTML_ANCHORS).unwrap();
        config
    }

    #[test]
    fn builds_index_from_anchor_files() {
        let temp = TempDir::new().unwrap();
        let config = create_test_config(&temp);

        let indexer = Indexer::new(&config);
        let mut reporter = TestReporter::default();
        let stats = indexer.update(&mut reporter, false).unwrap();

        assert!(!stats.skipped);
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.records_read, 2);
        assert_eq!(stats.terms, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.specs, 2);

        assert_eq!(
            *reporter.events.borrow(),
            vec![
                "start: anchors-d.data (1/2)",
                "done: anchors-d.data (1 records)",
                "start: anchors-h.data (2/2)",
                "done: anchors-h.data (1 records)",
                "complete: 2 files, skipped=false",
            ]
        );

        let index = load_index(indexer.index_dir()).unwrap();
        let event = index.lookup("event");
        assert_eq!(event[0].uri, "#concept-event");
        assert_eq!(event[1].uri, "nav-history-apis.html#dom-window-event");
        assert_eq!(index.spec_map["dom"].title, "DOM Standard");
    }

    #[test]
    fn unchanged_inputs_are_skipped() {
        let temp = TempDir::new().unwrap();
        let config = create_test_config(&temp);
        let indexer = Indexer::new(&config);

        indexer.update(&mut SilentReporter, false).unwrap();
        let stats = indexer.update(&mut SilentReporter, false).unwrap();
        assert!(stats.skipped);
        assert_eq!(stats.files_processed, 0);

        let forced = indexer.update(&mut SilentReporter, true).unwrap();
        assert!(!forced.skipped);
        assert_eq!(forced.files_processed, 2);
    }

    #[test]
    fn rebuilds_after_input_change() {
        let temp = TempDir::new().unwrap();
        let config = create_test_config(&temp);
        let indexer = Indexer::new(&config);
        indexer.update(&mut SilentReporter, false).unwrap();

        fs::remove_file(config.anchors_dir().join("anchors-h.data")).unwrap();
        let stats = indexer.update(&mut SilentReporter, false).unwrap();
        assert!(!stats.skipped);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let config = create_test_config(&temp);
        let indexer = Indexer::new(&config);

        indexer.update(&mut SilentReporter, true).unwrap();
        let first = fs::read(by_term_path(indexer.index_dir())).unwrap();
        indexer.update(&mut SilentReporter, true).unwrap();
        assert_eq!(fs::read(by_term_path(indexer.index_dir())).unwrap(), first);
    }

    #[test]
    fn unresolved_urls_abort_without_writing() {
        let temp = TempDir::new().unwrap();
        let config = create_test_config(&temp);
        fs::write(
            config.anchors_dir().join("anchors-x.data"),
            "thing\ndfn\nx\nx\n1\ncurrent\nhttps://unknown.example/#thing\n1\n1\n-\n",
        )
        .unwrap();

        let indexer = Indexer::new(&config);
        match indexer.update(&mut SilentReporter, false) {
            Err(IndexError::UnresolvedUrls { urls }) => {
                assert_eq!(urls, vec!["https://unknown.example/#thing".to_string()]);
            }
            other => panic!("expected unresolved urls, got {other:?}"),
        }
        assert!(!artifacts_exist(indexer.index_dir()));
    }

    #[test]
    fn reads_definition_lists() {
        let temp = TempDir::new().unwrap();
        let mut config = create_test_config(&temp);
        config.index.definitions_dir = Some("dfns".to_string());
        let dfns = temp.path().join("dfns");
        fs::create_dir_all(&dfns).unwrap();
        fs::write(
            dfns.join("dom.json"),
            r#"{
                "spec": "dom",
                "dfns": [{
                    "href": "https://dom.spec.whatwg.org/#concept-tree",
                    "linkingText": ["tree"],
                    "type": "dfn",
                    "for": [],
                    "access": "public",
                    "informative": false
                }]
            }"#,
        )
        .unwrap();

        let indexer = Indexer::new(&config);
        let stats = indexer.update(&mut SilentReporter, false).unwrap();
        assert_eq!(stats.files_processed, 3);

        let index = load_index(indexer.index_dir()).unwrap();
        assert_eq!(index.lookup("tree")[0].uri, "#concept-tree");
    }
}
