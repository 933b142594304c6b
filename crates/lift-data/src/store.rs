//! Per-user store of aggregated exercise series.
//!
//! One entry per uploaded export file, keyed by file name (uploads are
//! saved as `storage/<user>`, so the file name doubles as the user key).
//! The contents are rebuilt wholesale by [`DataStore::load`] and swapped
//! in under a write lock, so the serving layer can keep reading while a
//! reload runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use lift_core::error::Result;
use lift_core::models::ExerciseSeries;
use tracing::{debug, warn};

use crate::{aggregator, normalizer, reader};

// ── DataStore ─────────────────────────────────────────────────────────────────

/// All loaded users' series behind a reader/writer lock.
pub struct DataStore {
    storage_dir: PathBuf,
    inner: RwLock<HashMap<String, ExerciseSeries>>,
}

impl DataStore {
    /// An empty store over `storage_dir`. Call [`load`](Self::load) to
    /// populate it.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// The directory this store sweeps on [`load`](Self::load).
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Rebuild the store from every export under the storage directory.
    ///
    /// Each file runs the read → normalize → aggregate pipeline. A file
    /// that fails at any stage is logged and skipped, so one corrupt
    /// export never blocks the others, and nothing partial from it is
    /// committed. The finished map replaces the previous contents in one
    /// swap under the write lock.
    ///
    /// Returns the number of files that loaded successfully.
    pub fn load(&self) -> usize {
        let mut fresh: HashMap<String, ExerciseSeries> = HashMap::new();

        for path in find_export_files(&self.storage_dir) {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match load_export(&path) {
                Ok(series) => {
                    fresh.insert(name.to_string(), series);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        debug!(
            "Loaded {} user series from {}",
            fresh.len(),
            self.storage_dir.display()
        );

        let count = fresh.len();
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        count
    }

    /// A clone of one user's series, or `None` when the user is unknown.
    pub fn query(&self, user: &str) -> Option<ExerciseSeries> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user)
            .cloned()
    }

    /// A clone of the entire store, for the bulk data endpoint.
    pub fn snapshot(&self) -> HashMap<String, ExerciseSeries> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of user entries currently loaded.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` when no user has been loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Regular files under `dir`, sorted by path.
fn find_export_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Storage directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Run the full pipeline for one export file.
fn load_export(path: &Path) -> Result<ExerciseSeries> {
    let (records, dialect) = reader::read_lifting_csv(path)?;
    let sets = normalizer::normalize(&records, dialect)?;
    Ok(aggregator::calculate_exercise_series(&sets))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
