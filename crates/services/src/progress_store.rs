use std::collections::HashSet;
use std::sync::Arc;

use roadmap_core::model::{UserId, WeekId};
use storage::{CompletionRepository, SyncError};
use tracing::warn;

/// The set of weeks the user has marked fully complete, synchronized with
/// the remote completions table.
///
/// Mutations are optimistic: the in-memory set changes first, then the
/// remote write is awaited, and on failure the local change is rolled back
/// so the UI never silently diverges from confirmed remote state. Because
/// the mutating methods take `&mut self` and only return once the remote
/// round trip has settled, writes for any given week are applied in issue
/// order without a per-key queue.
pub struct ProgressStore {
    user: UserId,
    completions: Arc<dyn CompletionRepository>,
    completed: HashSet<WeekId>,
    loaded: bool,
}

impl ProgressStore {
    /// Creates an unloaded store. Until `load` succeeds the store reports
    /// `is_loaded() == false` and callers must render a loading state rather
    /// than claiming zero progress.
    #[must_use]
    pub fn new(user: UserId, completions: Arc<dyn CompletionRepository>) -> Self {
        Self {
            user,
            completions,
            completed: HashSet::new(),
            loaded: false,
        }
    }

    /// Hydrates the completed set from the remote table.
    ///
    /// On failure the store keeps whatever it had (empty-but-stale on a
    /// fresh session) and remains retry-eligible.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the fetch fails.
    pub async fn load(&mut self) -> Result<(), SyncError> {
        let ids = self.completions.list_completed(self.user).await?;
        self.completed = ids.into_iter().collect();
        self.loaded = true;
        Ok(())
    }

    /// True once a remote fetch has succeeded this session.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Pure membership test against the in-memory set.
    #[must_use]
    pub fn is_complete(&self, week_id: &WeekId) -> bool {
        self.completed.contains(week_id)
    }

    #[must_use]
    pub fn completed_ids(&self) -> &HashSet<WeekId> {
        &self.completed
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Marks a week complete: optimistic insert, then remote upsert.
    /// Idempotent; marking an already-complete week re-issues the upsert,
    /// which the remote table treats as a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the upsert fails; the optimistic insert is
    /// rolled back first.
    pub async fn mark_complete(&mut self, week_id: &WeekId) -> Result<(), SyncError> {
        let inserted = self.completed.insert(week_id.clone());
        if let Err(e) = self.completions.upsert_completion(self.user, week_id).await {
            if inserted {
                self.completed.remove(week_id);
            }
            warn!(week = %week_id, error = %e, "completion upsert failed, rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// Marks a week not complete: optimistic removal, then remote delete.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the delete fails; the optimistic removal is
    /// rolled back first.
    pub async fn mark_incomplete(&mut self, week_id: &WeekId) -> Result<(), SyncError> {
        let removed = self.completed.remove(week_id);
        if let Err(e) = self.completions.delete_completion(self.user, week_id).await {
            if removed {
                self.completed.insert(week_id.clone());
            }
            warn!(week = %week_id, error = %e, "completion delete failed, rolled back");
            return Err(e);
        }
        Ok(())
    }

    /// Flips a week between complete and not complete. Returns the new
    /// completion state.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the remote write fails; local state is rolled
    /// back.
    pub async fn toggle(&mut self, week_id: &WeekId) -> Result<bool, SyncError> {
        if self.is_complete(week_id) {
            self.mark_incomplete(week_id).await?;
            Ok(false)
        } else {
            self.mark_complete(week_id).await?;
            Ok(true)
        }
    }
}
