mod checklist;
mod curriculum;
mod ids;
mod journal;
mod project;

pub use checklist::GoalChecklist;
pub use curriculum::{Curriculum, CurriculumError, Month, Track, Week};
pub use ids::{ParseIdError, ProjectId, UserId, WeekId};
pub use journal::{JournalDraft, JournalEntry, JournalError, Mood};
pub use project::{Project, ProjectDraft, ProjectError};
