use roadmap_core::Clock;
use roadmap_core::model::{Curriculum, WeekId};
use roadmap_core::progress::{self, ProgressSummary};
use storage::{GoalChecklistStore, SyncError};
use tracing::warn;

use crate::error::ProgressError;
use crate::progress_store::ProgressStore;

/// Per-week state as the presentation layer needs it.
///
/// `percent` comes from the goal checklist alone; `complete` is the
/// independent whole-week flag. A week can read 100% while not complete and
/// vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekProgress {
    pub week_id: WeekId,
    pub checked_goals: usize,
    pub total_goals: usize,
    pub percent: u8,
    pub complete: bool,
}

/// Session facade over the curriculum, the remote-synced progress store, and
/// the local goal checklist.
///
/// Every mutation returns a freshly derived `ProgressSummary` so callers
/// never read a stale aggregate.
pub struct RoadmapService {
    clock: Clock,
    curriculum: Curriculum,
    progress: ProgressStore,
    goals: GoalChecklistStore,
}

impl RoadmapService {
    #[must_use]
    pub fn new(
        clock: Clock,
        curriculum: Curriculum,
        progress: ProgressStore,
        goals: GoalChecklistStore,
    ) -> Self {
        Self {
            clock,
            curriculum,
            progress,
            goals,
        }
    }

    /// Hydrates the progress store from the remote table.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on fetch failure; the store stays stale and the
    /// call can simply be retried.
    pub async fn load(&mut self) -> Result<(), SyncError> {
        self.progress.load().await
    }

    /// True once remote completion state has been fetched this session.
    /// Until then the UI must show a loading state, not 0%.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.progress.is_loaded()
    }

    #[must_use]
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    #[must_use]
    pub fn is_week_complete(&self, week_id: &WeekId) -> bool {
        self.progress.is_complete(week_id)
    }

    /// Derives the current summary metrics.
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        progress::summarize(
            &self.curriculum,
            self.progress.completed_ids(),
            self.clock.today(),
        )
    }

    /// Flips whole-week completion and returns the recomputed summary.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownWeek` for ids not in the curriculum
    /// and `ProgressError::Sync` if the remote write fails (local state is
    /// rolled back).
    pub async fn toggle_week(&mut self, week_id: &WeekId) -> Result<ProgressSummary, ProgressError> {
        if self.curriculum.find_week(week_id).is_none() {
            return Err(ProgressError::UnknownWeek {
                id: week_id.clone(),
            });
        }
        self.progress.toggle(week_id).await?;
        Ok(self.summary())
    }

    /// Flips one goal checkbox and returns the week's new partial state.
    ///
    /// Goal state is local-only and independent of week completion; checking
    /// every goal does not mark the week complete.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownWeek` or `ProgressError::GoalOutOfRange`
    /// for references the curriculum cannot satisfy.
    pub fn toggle_goal(
        &mut self,
        week_id: &WeekId,
        goal_index: usize,
    ) -> Result<WeekProgress, ProgressError> {
        let week = self
            .curriculum
            .find_week(week_id)
            .ok_or_else(|| ProgressError::UnknownWeek {
                id: week_id.clone(),
            })?;
        if goal_index >= week.goal_count() {
            return Err(ProgressError::GoalOutOfRange {
                id: week_id.clone(),
                index: goal_index,
            });
        }

        // The toggle itself always lands in memory; a failed device write
        // only costs persistence across restarts, so it degrades to a
        // warning instead of failing the action.
        if let Err(e) = self.goals.toggle(week_id, goal_index) {
            warn!(week = %week_id, error = %e, "goal cache write failed, state kept in memory");
        }

        Ok(self.week_progress_for(week_id, week.goal_count()))
    }

    /// Reads a week's combined checklist/completion state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownWeek` if the id is not in the
    /// curriculum.
    pub fn week_progress(&self, week_id: &WeekId) -> Result<WeekProgress, ProgressError> {
        let week = self
            .curriculum
            .find_week(week_id)
            .ok_or_else(|| ProgressError::UnknownWeek {
                id: week_id.clone(),
            })?;
        Ok(self.week_progress_for(week_id, week.goal_count()))
    }

    #[must_use]
    pub fn is_goal_checked(&self, week_id: &WeekId, goal_index: usize) -> bool {
        self.goals.is_checked(week_id, goal_index)
    }

    fn week_progress_for(&self, week_id: &WeekId, total_goals: usize) -> WeekProgress {
        let checked_goals = self.goals.checked_count(week_id);
        WeekProgress {
            week_id: week_id.clone(),
            checked_goals,
            total_goals,
            percent: progress::week_percent(checked_goals, total_goals),
            complete: self.progress.is_complete(week_id),
        }
    }
}
