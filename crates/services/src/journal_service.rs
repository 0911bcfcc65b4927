use std::sync::Arc;

use chrono::NaiveDate;
use roadmap_core::Clock;
use roadmap_core::model::{JournalDraft, JournalEntry, UserId};
use storage::JournalRepository;

use crate::error::JournalServiceError;

/// Orchestrates daily journal entries against the remote table.
///
/// Entries are keyed by `(user, entry_date)`; saving the same day twice
/// replaces the earlier entry.
#[derive(Clone)]
pub struct JournalService {
    clock: Clock,
    user: UserId,
    journals: Arc<dyn JournalRepository>,
}

impl JournalService {
    #[must_use]
    pub fn new(clock: Clock, user: UserId, journals: Arc<dyn JournalRepository>) -> Self {
        Self {
            clock,
            user,
            journals,
        }
    }

    /// The default entry date for a fresh form: today.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Inserts or replaces the entry for the draft's date.
    ///
    /// # Errors
    ///
    /// Returns `JournalServiceError::Sync` if the upsert fails.
    pub async fn save_entry(&self, draft: JournalDraft) -> Result<JournalEntry, JournalServiceError> {
        let entry = self.journals.upsert_entry(self.user, &draft).await?;
        Ok(entry)
    }

    /// Lists entries, newest entry date first.
    ///
    /// # Errors
    ///
    /// Returns `JournalServiceError::Sync` on fetch failure.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>, JournalServiceError> {
        let entries = self.journals.list_entries(self.user).await?;
        Ok(entries)
    }

    /// Fetches the entry for one day, if any.
    ///
    /// # Errors
    ///
    /// Returns `JournalServiceError::Sync` on fetch failure.
    pub async fn entry_for(
        &self,
        entry_date: NaiveDate,
    ) -> Result<Option<JournalEntry>, JournalServiceError> {
        let entry = self.journals.get_entry(self.user, entry_date).await?;
        Ok(entry)
    }
}
