//! Wire shapes for the hosted tables and their domain conversions.
//!
//! Rows mirror the remote schema exactly; conversion into domain types goes
//! through the validating constructors so a corrupt row surfaces as a
//! conversion error instead of leaking into the domain.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use roadmap_core::model::{
    JournalDraft, JournalEntry, JournalError, Mood, Project, ProjectDraft, ProjectError,
    ProjectId, UserId,
};

// ─── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionRow {
    pub week_id: String,
    pub complete: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCompletionRow<'a> {
    pub user_id: UserId,
    pub week_id: &'a str,
    pub complete: bool,
}

// ─── projects ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRow {
    pub id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    pub(crate) fn into_project(self) -> Result<Project, ProjectError> {
        let github_url = parse_opt_url("github_url", self.github_url)?;
        let live_url = parse_opt_url("live_url", self.live_url)?;
        let file_url = parse_opt_url("file_url", self.file_url)?;
        let draft = ProjectDraft::new(
            self.title,
            self.description,
            github_url,
            live_url,
            self.technologies,
            file_url,
        )?;
        Ok(Project::from_persisted(
            self.id,
            self.user_id,
            draft,
            self.created_at,
            self.updated_at,
        ))
    }
}

fn parse_opt_url(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Url>, ProjectError> {
    match raw {
        Some(raw) => ProjectDraft::parse_url(field, &raw),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewProjectRow<'a> {
    pub user_id: UserId,
    pub title: &'a str,
    pub description: &'a str,
    pub github_url: Option<&'a Url>,
    pub live_url: Option<&'a Url>,
    pub technologies: &'a [String],
    pub file_url: Option<&'a Url>,
}

impl<'a> NewProjectRow<'a> {
    pub(crate) fn from_draft(user_id: UserId, draft: &'a ProjectDraft) -> Self {
        Self {
            user_id,
            title: draft.title(),
            description: draft.description(),
            github_url: draft.github_url(),
            live_url: draft.live_url(),
            technologies: draft.technologies(),
            file_url: draft.file_url(),
        }
    }
}

// ─── daily_journals ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct JournalRow {
    pub user_id: UserId,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
    #[serde(default)]
    pub learnings: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub mood: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalRow {
    pub(crate) fn into_entry(self) -> Result<JournalEntry, JournalError> {
        let draft = JournalDraft::new(
            self.entry_date,
            self.completed_tasks,
            self.learnings,
            self.activities,
            self.notes,
            Mood::from_persisted(self.mood.as_deref()),
        )?;
        Ok(JournalEntry::from_persisted(
            self.user_id,
            draft,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewJournalRow<'a> {
    pub user_id: UserId,
    pub entry_date: NaiveDate,
    pub completed_tasks: &'a [String],
    pub learnings: &'a [String],
    pub activities: &'a [String],
    pub notes: &'a str,
    pub mood: &'static str,
}

impl<'a> NewJournalRow<'a> {
    pub(crate) fn from_draft(user_id: UserId, draft: &'a JournalDraft) -> Self {
        Self {
            user_id,
            entry_date: draft.entry_date(),
            completed_tasks: draft.completed_tasks(),
            learnings: draft.learnings(),
            activities: draft.activities(),
            notes: draft.notes(),
            mood: draft.mood().as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn completion_row_deserializes_wire_shape() {
        let row: CompletionRow =
            serde_json::from_str(r#"{"week_id": "w1", "complete": true}"#).unwrap();
        assert_eq!(row.week_id, "w1");
        assert!(row.complete);
    }

    #[test]
    fn project_row_converts_to_domain() {
        let json = r#"{
            "id": "8f9f2a6e-4f2d-4c05-9c5d-1f1f6a2b3c4d",
            "user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "title": "RAG Chatbot",
            "description": "Retrieval-augmented chatbot.",
            "github_url": "https://github.com/me/rag",
            "live_url": null,
            "technologies": ["Python", "FastAPI"],
            "file_url": null,
            "created_at": "2025-11-05T10:00:00Z",
            "updated_at": "2025-11-05T10:00:00Z"
        }"#;
        let row: ProjectRow = serde_json::from_str(json).unwrap();
        let project = row.into_project().unwrap();
        assert_eq!(project.title(), "RAG Chatbot");
        assert_eq!(project.github_url().unwrap().host_str(), Some("github.com"));
        assert_eq!(project.technologies(), ["Python", "FastAPI"]);
    }

    #[test]
    fn project_row_with_bad_url_fails_conversion() {
        let json = r#"{
            "id": "8f9f2a6e-4f2d-4c05-9c5d-1f1f6a2b3c4d",
            "user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "title": "Broken",
            "description": "Row with a mangled link.",
            "github_url": "not a url",
            "live_url": null,
            "technologies": [],
            "file_url": null,
            "created_at": "2025-11-05T10:00:00Z",
            "updated_at": "2025-11-05T10:00:00Z"
        }"#;
        let row: ProjectRow = serde_json::from_str(json).unwrap();
        assert!(row.into_project().is_err());
    }

    #[test]
    fn journal_row_defaults_missing_lists_and_mood() {
        let json = r#"{
            "user_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "entry_date": "2025-11-05",
            "completed_tasks": ["shipped auth"],
            "mood": "mystery",
            "created_at": "2025-11-05T21:00:00Z",
            "updated_at": "2025-11-05T21:00:00Z"
        }"#;
        let row: JournalRow = serde_json::from_str(json).unwrap();
        let entry = row.into_entry().unwrap();
        assert_eq!(entry.mood(), Mood::Okay);
        assert!(entry.learnings().is_empty());
    }

    #[test]
    fn new_journal_row_serializes_mood_lowercase() {
        let draft = JournalDraft::new(
            NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            vec!["task".into()],
            vec![],
            vec![],
            "",
            Mood::Great,
        )
        .unwrap();
        let row = NewJournalRow::from_draft(UserId::new(Uuid::from_u128(1)), &draft);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["mood"], "great");
        assert_eq!(json["entry_date"], "2025-11-05");
    }
}
