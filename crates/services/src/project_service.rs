use std::sync::Arc;

use roadmap_core::model::{Project, ProjectDraft, ProjectId, UserId};
use storage::ProjectRepository;

use crate::error::ProjectServiceError;

/// Orchestrates the project showcase CRUD against the remote table.
#[derive(Clone)]
pub struct ProjectService {
    user: UserId,
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    #[must_use]
    pub fn new(user: UserId, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { user, projects }
    }

    /// Persists a new project and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `ProjectServiceError::Sync` if the insert fails.
    pub async fn add_project(&self, draft: ProjectDraft) -> Result<Project, ProjectServiceError> {
        let project = self.projects.insert_project(self.user, &draft).await?;
        Ok(project)
    }

    /// Lists the user's projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProjectServiceError::Sync` on fetch failure.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ProjectServiceError> {
        let projects = self.projects.list_projects(self.user).await?;
        Ok(projects)
    }

    /// Deletes one of the user's projects.
    ///
    /// # Errors
    ///
    /// Returns `ProjectServiceError::Sync` if the delete fails.
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), ProjectServiceError> {
        self.projects.delete_project(self.user, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use uuid::Uuid;

    fn service() -> ProjectService {
        ProjectService::new(
            UserId::new(Uuid::from_u128(1)),
            Arc::new(InMemoryRepository::new()),
        )
    }

    #[tokio::test]
    async fn add_list_delete_round_trip() {
        let service = service();
        let draft = ProjectDraft::new(
            "Resume Site",
            "Static site with project writeups.",
            None,
            None,
            ProjectDraft::parse_technologies("Astro, Tailwind"),
            None,
        )
        .unwrap();

        let created = service.add_project(draft).await.unwrap();
        let listed = service.list_projects().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].technologies(), ["Astro", "Tailwind"]);

        service.delete_project(created.id()).await.unwrap();
        assert!(service.list_projects().await.unwrap().is_empty());
    }
}
