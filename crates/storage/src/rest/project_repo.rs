use async_trait::async_trait;
use reqwest::Method;
use roadmap_core::model::{Project, ProjectDraft, ProjectId, UserId};
use tracing::warn;

use super::rows::{NewProjectRow, ProjectRow};
use super::{RestRepository, check_status, eq_filter, transport};
use crate::repository::{ProjectRepository, SyncError};

const TABLE: &str = "projects";

#[async_trait]
impl ProjectRepository for RestRepository {
    async fn insert_project(
        &self,
        user: UserId,
        draft: &ProjectDraft,
    ) -> Result<Project, SyncError> {
        let row = NewProjectRow::from_draft(user, draft);
        let resp = self
            .request(Method::POST, TABLE)?
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(transport)?;
        let mut rows: Vec<ProjectRow> = check_status(resp)?.json().await.map_err(transport)?;

        let row = rows
            .pop()
            .ok_or_else(|| SyncError::Serialization("insert returned no row".into()))?;
        row.into_project()
            .map_err(|e| SyncError::Serialization(e.to_string()))
    }

    async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, SyncError> {
        let resp = self
            .request(Method::GET, TABLE)?
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq_filter(user)),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<ProjectRow> = check_status(resp)?.json().await.map_err(transport)?;

        // A single corrupt row should not take the whole showcase down.
        let mut projects = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_project() {
                Ok(project) => projects.push(project),
                Err(e) => warn!(error = %e, "skipping project row that failed validation"),
            }
        }
        Ok(projects)
    }

    async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), SyncError> {
        let resp = self
            .request(Method::DELETE, TABLE)?
            .query(&[("id", eq_filter(id)), ("user_id", eq_filter(user))])
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?;
        Ok(())
    }
}
