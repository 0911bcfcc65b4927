//! Shared error types for the services crate.

use thiserror::Error;

use roadmap_core::model::{JournalError, ProjectError, WeekId};
use storage::SyncError;

/// Errors emitted by `ProgressStore` and `RoadmapService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("week {id} is not part of the curriculum")]
    UnknownWeek { id: WeekId },

    #[error("goal index {index} is out of range for week {id}")]
    GoalOutOfRange { id: WeekId, index: usize },

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Errors emitted by `ProjectService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectServiceError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Errors emitted by `JournalService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JournalServiceError {
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}
