use async_trait::async_trait;
use reqwest::Method;
use roadmap_core::model::{UserId, WeekId};

use super::rows::{CompletionRow, NewCompletionRow};
use super::{RestRepository, check_status, eq_filter, transport};
use crate::repository::{CompletionRepository, SyncError};

const TABLE: &str = "completions";

#[async_trait]
impl CompletionRepository for RestRepository {
    async fn list_completed(&self, user: UserId) -> Result<Vec<WeekId>, SyncError> {
        let resp = self
            .request(Method::GET, TABLE)?
            .query(&[
                ("select", "week_id,complete".to_string()),
                ("user_id", eq_filter(user)),
            ])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<CompletionRow> = check_status(resp)?.json().await.map_err(transport)?;

        Ok(rows
            .into_iter()
            .filter(|row| row.complete)
            .map(|row| WeekId::new(row.week_id))
            .collect())
    }

    async fn upsert_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError> {
        let row = NewCompletionRow {
            user_id: user,
            week_id: week_id.as_str(),
            complete: true,
        };
        let resp = self
            .request(Method::POST, TABLE)?
            .query(&[("on_conflict", "user_id,week_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?;
        Ok(())
    }

    async fn delete_completion(&self, user: UserId, week_id: &WeekId) -> Result<(), SyncError> {
        let resp = self
            .request(Method::DELETE, TABLE)?
            .query(&[
                ("user_id", eq_filter(user)),
                ("week_id", eq_filter(week_id)),
            ])
            .send()
            .await
            .map_err(transport)?;
        // PostgREST deletes of absent rows return success with no rows.
        check_status(resp)?;
        Ok(())
    }
}
