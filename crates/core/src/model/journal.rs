use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JournalError {
    #[error("a journal entry needs at least one task, learning, activity, or note")]
    EmptyEntry,
}

//
// ─── MOOD ──────────────────────────────────────────────────────────────────────
//

/// How the day felt, on a deliberately coarse scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    #[default]
    Okay,
    Bad,
}

impl Mood {
    /// Parses the persisted lowercase form; unknown values read as `Okay`,
    /// matching how stale rows are displayed rather than rejected.
    #[must_use]
    pub fn from_persisted(raw: Option<&str>) -> Self {
        match raw {
            Some("great") => Mood::Great,
            Some("bad") => Mood::Bad,
            _ => Mood::Okay,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Okay => "okay",
            Mood::Bad => "bad",
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// User-entered journal fields for one calendar day.
///
/// Upserted against the `(user, entry_date)` key, so re-saving the same day
/// replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalDraft {
    entry_date: NaiveDate,
    completed_tasks: Vec<String>,
    learnings: Vec<String>,
    activities: Vec<String>,
    notes: String,
    mood: Mood,
}

impl JournalDraft {
    /// Creates a validated draft. Blank list items are dropped, mirroring the
    /// entry form where empty rows are placeholders.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::EmptyEntry` if nothing remains after cleanup.
    pub fn new(
        entry_date: NaiveDate,
        completed_tasks: Vec<String>,
        learnings: Vec<String>,
        activities: Vec<String>,
        notes: impl Into<String>,
        mood: Mood,
    ) -> Result<Self, JournalError> {
        let completed_tasks = clean_items(completed_tasks);
        let learnings = clean_items(learnings);
        let activities = clean_items(activities);
        let notes = notes.into().trim().to_owned();

        if completed_tasks.is_empty()
            && learnings.is_empty()
            && activities.is_empty()
            && notes.is_empty()
        {
            return Err(JournalError::EmptyEntry);
        }

        Ok(Self {
            entry_date,
            completed_tasks,
            learnings,
            activities,
            notes,
            mood,
        })
    }

    #[must_use]
    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    #[must_use]
    pub fn completed_tasks(&self) -> &[String] {
        &self.completed_tasks
    }

    #[must_use]
    pub fn learnings(&self) -> &[String] {
        &self.learnings
    }

    #[must_use]
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn mood(&self) -> Mood {
        self.mood
    }
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.trim().to_owned())
        .filter(|i| !i.is_empty())
        .collect()
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// A journal entry as persisted in the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    user_id: UserId,
    draft: JournalDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Rehydrates an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(
        user_id: UserId,
        draft: JournalDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            draft,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn entry_date(&self) -> NaiveDate {
        self.draft.entry_date()
    }

    #[must_use]
    pub fn completed_tasks(&self) -> &[String] {
        self.draft.completed_tasks()
    }

    #[must_use]
    pub fn learnings(&self) -> &[String] {
        self.draft.learnings()
    }

    #[must_use]
    pub fn activities(&self) -> &[String] {
        self.draft.activities()
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        self.draft.notes()
    }

    #[must_use]
    pub fn mood(&self) -> Mood {
        self.draft.mood()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
