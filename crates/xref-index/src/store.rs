//! Shared, atomically replaceable index snapshot.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use arc_swap::ArcSwap;
use tracing::info;

use crate::{IndexError, XrefIndex, artifacts::load_index};

/// Holds the current [`XrefIndex`].
///
/// Readers take an `Arc` snapshot and keep using it even if the index is replaced
/// meanwhile. Replacement never exposes a partially-updated index.
pub struct IndexStore {
    /// Current snapshot.
    current: ArcSwap<XrefIndex>,
    /// Bumped on every replacement.
    generation: AtomicU64,
    /// Directory the artifacts are reloaded from, if any.
    dir: Option<PathBuf>,
}

impl IndexStore {
    /// Wraps an in-memory index.
    pub fn new(index: XrefIndex) -> Self {
        Self {
            current: ArcSwap::from_pointee(index),
            generation: AtomicU64::new(0),
            dir: None,
        }
    }

    /// Loads the artifacts from `dir`, which later [`reload`](Self::reload)s read again.
    pub fn open(dir: &Path) -> Result<Self, IndexError> {
        let index = load_index(dir)?;
        Ok(Self {
            dir: Some(dir.to_path_buf()),
            ..Self::new(index)
        })
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<XrefIndex> {
        self.current.load_full()
    }

    /// Swaps in a new index and returns the new generation.
    pub fn replace(&self, index: XrefIndex) -> u64 {
        self.current.store(Arc::new(index));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, "index replaced");
        generation
    }

    /// Re-reads the artifacts from the directory the store was opened from.
    ///
    /// On failure the current index stays in place.
    pub fn reload(&self) -> Result<u64, IndexError> {
        let Some(dir) = &self.dir else {
            return Ok(self.generation());
        };
        let index = load_index(dir)?;
        Ok(self.replace(index))
    }

    /// Number of replacements so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Directory backing this store, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}
