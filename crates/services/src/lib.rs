#![forbid(unsafe_code)]

pub mod error;
pub mod journal_service;
pub mod progress_store;
pub mod project_service;
pub mod roadmap_service;

pub use roadmap_core::Clock;

pub use error::{JournalServiceError, ProgressError, ProjectServiceError};
pub use journal_service::JournalService;
pub use progress_store::ProgressStore;
pub use project_service::ProjectService;
pub use roadmap_service::{RoadmapService, WeekProgress};
