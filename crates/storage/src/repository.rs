use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use roadmap_core::model::{
    JournalDraft, JournalEntry, Project, ProjectDraft, ProjectId, UserId, WeekId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by remote-store adapters.
///
/// Read failures leave callers with stale-but-usable local state; write
/// failures must be surfaced so optimistic local mutations can be rolled
/// back rather than silently diverging from the confirmed remote state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("not found")]
    NotFound,

    #[error("not authorized against the remote store")]
    Unauthorized,

    #[error("remote store did not respond in time")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for per-user week completion records.
///
/// One sparse record per `(user, week)` pair; an absent record means "not
/// complete". Upserts are idempotent on that key.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Fetch the ids of all weeks the user has marked complete.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on transport or auth failure; callers must treat
    /// the local set as stale, not as zero progress.
    async fn list_completed(&self, user: UserId) -> Result<Vec<WeekId>, SyncError>;

    /// Record the week as complete for the user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the write does not reach the remote store.
    async fn upsert_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError>;

    /// Remove the completion record. Deleting an absent record is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the delete does not reach the remote store.
    async fn delete_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError>;
}

/// Repository contract for the project showcase table.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new project; the store assigns id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the insert fails.
    async fn insert_project(
        &self,
        user: UserId,
        draft: &ProjectDraft,
    ) -> Result<Project, SyncError>;

    /// List the user's projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on transport or auth failure.
    async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, SyncError>;

    /// Delete one of the user's projects.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the delete fails.
    async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), SyncError>;
}

/// Repository contract for the daily journal table, keyed by
/// `(user, entry_date)`.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Insert or replace the entry for the draft's date.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the upsert fails.
    async fn upsert_entry(
        &self,
        user: UserId,
        draft: &JournalDraft,
    ) -> Result<JournalEntry, SyncError>;

    /// List the user's entries, newest entry date first.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on transport or auth failure.
    async fn list_entries(&self, user: UserId) -> Result<Vec<JournalEntry>, SyncError>;

    /// Fetch the entry for one calendar day, if any.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` on transport or auth failure.
    async fn get_entry(
        &self,
        user: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<JournalEntry>, SyncError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    completions: Arc<Mutex<HashSet<(UserId, WeekId)>>>,
    projects: Arc<Mutex<Vec<Project>>>,
    journals: Arc<Mutex<HashMap<(UserId, NaiveDate), JournalEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> SyncError {
    SyncError::Connection(e.to_string())
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn list_completed(&self, user: UserId) -> Result<Vec<WeekId>, SyncError> {
        let guard = self.completions.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, w)| w.clone())
            .collect())
    }

    async fn upsert_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError> {
        let mut guard = self.completions.lock().map_err(poisoned)?;
        guard.insert((user, week_id.clone()));
        Ok(())
    }

    async fn delete_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError> {
        let mut guard = self.completions.lock().map_err(poisoned)?;
        guard.remove(&(user, week_id.clone()));
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository {
    async fn insert_project(
        &self,
        user: UserId,
        draft: &ProjectDraft,
    ) -> Result<Project, SyncError> {
        let now = Utc::now();
        let project = Project::from_persisted(
            ProjectId::new(Uuid::new_v4()),
            user,
            draft.clone(),
            now,
            now,
        );
        let mut guard = self.projects.lock().map_err(poisoned)?;
        guard.push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, SyncError> {
        let guard = self.projects.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .rev()
            .filter(|p| p.user_id() == user)
            .cloned()
            .collect())
    }

    async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), SyncError> {
        let mut guard = self.projects.lock().map_err(poisoned)?;
        guard.retain(|p| !(p.user_id() == user && p.id() == id));
        Ok(())
    }
}

#[async_trait]
impl JournalRepository for InMemoryRepository {
    async fn upsert_entry(
        &self,
        user: UserId,
        draft: &JournalDraft,
    ) -> Result<JournalEntry, SyncError> {
        let now = Utc::now();
        let mut guard = self.journals.lock().map_err(poisoned)?;
        let created_at = guard
            .get(&(user, draft.entry_date()))
            .map_or(now, JournalEntry::created_at);
        let entry = JournalEntry::from_persisted(user, draft.clone(), created_at, now);
        guard.insert((user, draft.entry_date()), entry.clone());
        Ok(entry)
    }

    async fn list_entries(&self, user: UserId) -> Result<Vec<JournalEntry>, SyncError> {
        let guard = self.journals.lock().map_err(poisoned)?;
        let mut entries: Vec<JournalEntry> = guard
            .iter()
            .filter(|((u, _), _)| *u == user)
            .map(|(_, e)| e.clone())
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.entry_date()));
        Ok(entries)
    }

    async fn get_entry(
        &self,
        user: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<JournalEntry>, SyncError> {
        let guard = self.journals.lock().map_err(poisoned)?;
        Ok(guard.get(&(user, entry_date)).cloned())
    }
}

/// Aggregates the table repositories behind trait objects so backends can be
/// swapped without touching the service layer.
#[derive(Clone)]
pub struct Storage {
    pub completions: Arc<dyn CompletionRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub journals: Arc<dyn JournalRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo.clone());
        let projects: Arc<dyn ProjectRepository> = Arc::new(repo.clone());
        let journals: Arc<dyn JournalRepository> = Arc::new(repo);
        Self {
            completions,
            projects,
            journals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::model::Mood;
    use roadmap_core::time::fixed_now;

    fn user(n: u128) -> UserId {
        UserId::new(Uuid::from_u128(n))
    }

    #[tokio::test]
    async fn completions_round_trip_per_user() {
        let repo = InMemoryRepository::new();
        let alice = user(1);
        let bob = user(2);
        let w1 = WeekId::new("w1");

        repo.upsert_completion(alice, &w1).await.unwrap();
        repo.upsert_completion(alice, &w1).await.unwrap();

        assert_eq!(repo.list_completed(alice).await.unwrap(), vec![w1.clone()]);
        assert!(repo.list_completed(bob).await.unwrap().is_empty());

        repo.delete_completion(alice, &w1).await.unwrap();
        assert!(repo.list_completed(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_absent_completion_is_not_an_error() {
        let repo = InMemoryRepository::new();
        repo.delete_completion(user(1), &WeekId::new("w9"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn projects_list_newest_first() {
        let repo = InMemoryRepository::new();
        let alice = user(1);
        let first = ProjectDraft::new("First", "desc", None, None, vec![], None).unwrap();
        let second = ProjectDraft::new("Second", "desc", None, None, vec![], None).unwrap();

        repo.insert_project(alice, &first).await.unwrap();
        let kept = repo.insert_project(alice, &second).await.unwrap();

        let listed = repo.list_projects(alice).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title(), "Second");

        repo.delete_project(alice, listed[1].id()).await.unwrap();
        let listed = repo.list_projects(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), kept.id());
    }

    #[tokio::test]
    async fn journal_upsert_replaces_same_day_entry() {
        let repo = InMemoryRepository::new();
        let alice = user(1);
        let day = fixed_now().date_naive();

        let morning = JournalDraft::new(
            day,
            vec!["setup env".into()],
            vec![],
            vec![],
            "",
            Mood::Okay,
        )
        .unwrap();
        let evening = JournalDraft::new(
            day,
            vec!["setup env".into(), "first deploy".into()],
            vec![],
            vec![],
            "long day",
            Mood::Great,
        )
        .unwrap();

        repo.upsert_entry(alice, &morning).await.unwrap();
        repo.upsert_entry(alice, &evening).await.unwrap();

        let entries = repo.list_entries(alice).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].completed_tasks().len(), 2);
        assert_eq!(entries[0].mood(), Mood::Great);

        let fetched = repo.get_entry(alice, day).await.unwrap().unwrap();
        assert_eq!(fetched.notes(), "long day");
    }
}
