use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roadmap_core::model::{GoalChecklist, WeekId};
use thiserror::Error;
use tracing::warn;

/// Errors from persisting the goal-checklist document.
///
/// Hydration never produces an error: absent or malformed data falls back to
/// an empty cache. Only writes can fail, and the in-memory state is already
/// updated when they do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for per-goal checkbox state.
///
/// The whole cache is one JSON document mapping week ids to arrays of
/// checked goal indices, rewritten in full after every toggle. State lives
/// only on the originating device and is never synchronized to the remote
/// store.
#[derive(Debug)]
pub struct GoalChecklistStore {
    path: PathBuf,
    checklist: GoalChecklist,
}

impl GoalChecklistStore {
    /// Loads the cache from `path`.
    ///
    /// Fail-soft by contract: a missing file yields an empty cache silently,
    /// and an unreadable or malformed document yields an empty cache with a
    /// warning. Neither case is an error to the caller.
    #[must_use]
    pub fn hydrate(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let checklist = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(checklist) => checklist,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "goal cache malformed, starting empty");
                    GoalChecklist::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => GoalChecklist::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "goal cache unreadable, starting empty");
                GoalChecklist::new()
            }
        };
        Self { path, checklist }
    }

    /// Creates an empty store that will persist to `path`.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            checklist: GoalChecklist::new(),
        }
    }

    #[must_use]
    pub fn checklist(&self) -> &GoalChecklist {
        &self.checklist
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn checked_count(&self, week_id: &WeekId) -> usize {
        self.checklist.checked_count(week_id)
    }

    #[must_use]
    pub fn is_checked(&self, week_id: &WeekId, goal_index: usize) -> bool {
        self.checklist.is_checked(week_id, goal_index)
    }

    /// Flips one goal checkbox and rewrites the document.
    ///
    /// The in-memory flip happens regardless of the write outcome, so the
    /// session keeps working off the toggled state even if the device
    /// storage is momentarily unwritable.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the rewritten document cannot be persisted.
    pub fn toggle(&mut self, week_id: &WeekId, goal_index: usize) -> Result<(), CacheError> {
        self.checklist.toggle(week_id, goal_index);
        self.persist()
    }

    /// Drops all checked state and rewrites the document.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the rewritten document cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.checklist.clear();
        self.persist()
    }

    // Whole-document replace via a sibling temp file and rename, so an
    // interrupted write leaves the previous document intact.
    fn persist(&self) -> Result<(), CacheError> {
        let json = serde_json::to_string(&self.checklist)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
