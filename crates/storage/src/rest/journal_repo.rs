use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use roadmap_core::model::{JournalDraft, JournalEntry, UserId};
use tracing::warn;

use super::rows::{JournalRow, NewJournalRow};
use super::{RestRepository, check_status, eq_filter, transport};
use crate::repository::{JournalRepository, SyncError};

const TABLE: &str = "daily_journals";

#[async_trait]
impl JournalRepository for RestRepository {
    async fn upsert_entry(
        &self,
        user: UserId,
        draft: &JournalDraft,
    ) -> Result<JournalEntry, SyncError> {
        let row = NewJournalRow::from_draft(user, draft);
        let resp = self
            .request(Method::POST, TABLE)?
            .query(&[("on_conflict", "user_id,entry_date")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row)
            .send()
            .await
            .map_err(transport)?;
        let mut rows: Vec<JournalRow> = check_status(resp)?.json().await.map_err(transport)?;

        let row = rows
            .pop()
            .ok_or_else(|| SyncError::Serialization("upsert returned no row".into()))?;
        row.into_entry()
            .map_err(|e| SyncError::Serialization(e.to_string()))
    }

    async fn list_entries(&self, user: UserId) -> Result<Vec<JournalEntry>, SyncError> {
        let resp = self
            .request(Method::GET, TABLE)?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq_filter(user)),
                ("order", "entry_date.desc".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<JournalRow> = check_status(resp)?.json().await.map_err(transport)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(error = %e, "skipping journal row that failed validation"),
            }
        }
        Ok(entries)
    }

    async fn get_entry(
        &self,
        user: UserId,
        entry_date: NaiveDate,
    ) -> Result<Option<JournalEntry>, SyncError> {
        let resp = self
            .request(Method::GET, TABLE)?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq_filter(user)),
                ("entry_date", eq_filter(entry_date)),
            ])
            .send()
            .await
            .map_err(transport)?;
        let mut rows: Vec<JournalRow> = check_status(resp)?.json().await.map_err(transport)?;

        match rows.pop() {
            Some(row) => match row.into_entry() {
                Ok(entry) => Ok(Some(entry)),
                Err(e) => {
                    warn!(error = %e, "journal row for requested day failed validation");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
