//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tracing::debug;
use xref_config::Config;
use xref_index::{
    IndexStatus, Indexer, SilentReporter, artifacts_exist, detect_index_status, index_directory,
};
use xref_search::Searcher;

use super::output::report_index_error;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Number of `-v` flags given.
    pub verbose: u8,
    /// Searcher opened for this invocation.
    searcher: Option<Searcher>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            verbose: 0,
            searcher: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            verbose: 0,
            searcher: None,
        })
    }

    /// Returns the searcher, building or refreshing the index first if needed.
    pub fn searcher(&mut self) -> Result<&Searcher, ExitCode> {
        if self.searcher.is_none() {
            let searcher = ensure_index_fresh(&self.config)?;
            self.searcher = Some(searcher);
        }
        self.searcher.as_ref().ok_or(ExitCode::FAILURE)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    let config = Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })?;
    debug!(
        root = ?config.config_root,
        data_dir = %config.settings.data_dir.display(),
        "configuration loaded"
    );
    Ok(config)
}

/// Ensures the index matches its inputs, rebuilding it if needed.
///
/// A stale index whose rebuild fails is still served.
fn ensure_index_fresh(config: &Config) -> Result<Searcher, ExitCode> {
    let status = detect_index_status(config);
    debug!(status = status.description(), "checked index");
    match status {
        IndexStatus::Current => {}
        IndexStatus::Missing => {
            eprintln!("Index missing, building...");
            rebuild_index(config)?;
        }
        IndexStatus::Stale => {
            eprintln!("Index is stale, updating...");
            if rebuild_index(config).is_err() {
                if !artifacts_exist(&index_directory(config)) {
                    return Err(ExitCode::FAILURE);
                }
                eprintln!("warning: update failed, using the existing index");
            }
        }
    }
    open_searcher_or_failure(config)
}

/// Runs the indexing pipeline without progress output, reporting any failure.
fn rebuild_index(config: &Config) -> Result<(), ExitCode> {
    Indexer::new(config)
        .update(&mut SilentReporter, false)
        .map(|_| ())
        .map_err(|e| {
            report_index_error(&e);
            ExitCode::FAILURE
        })
}

/// Opens the searcher, exiting with a consistent error on failure.
fn open_searcher_or_failure(config: &Config) -> Result<Searcher, ExitCode> {
    Searcher::open(config).map_err(|e| {
        eprintln!("error: failed to open index: {e}");
        ExitCode::FAILURE
    })
}
