use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::model::ids::{ProjectId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProjectError {
    #[error("project title cannot be empty")]
    EmptyTitle,

    #[error("project description cannot be empty")]
    EmptyDescription,

    #[error("invalid {field} url: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// User-entered project fields before the remote store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    title: String,
    description: String,
    github_url: Option<Url>,
    live_url: Option<Url>,
    technologies: Vec<String>,
    file_url: Option<Url>,
}

impl ProjectDraft {
    /// Creates a validated draft.
    ///
    /// Title and description are trimmed; blank technology tags are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError` if title or description is empty after
    /// trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        github_url: Option<Url>,
        live_url: Option<Url>,
        technologies: Vec<String>,
        file_url: Option<Url>,
    ) -> Result<Self, ProjectError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ProjectError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ProjectError::EmptyDescription);
        }

        let technologies = technologies
            .into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Self {
            title: title.trim().to_owned(),
            description: description.trim().to_owned(),
            github_url,
            live_url,
            technologies,
            file_url,
        })
    }

    /// Splits a comma-separated tag string into cleaned technology tags.
    #[must_use]
    pub fn parse_technologies(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Parses an optional url field, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidUrl` naming the offending field.
    pub fn parse_url(field: &'static str, raw: &str) -> Result<Option<Url>, ProjectError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Url::parse(raw)
            .map(Some)
            .map_err(|source| ProjectError::InvalidUrl { field, source })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn github_url(&self) -> Option<&Url> {
        self.github_url.as_ref()
    }

    #[must_use]
    pub fn live_url(&self) -> Option<&Url> {
        self.live_url.as_ref()
    }

    #[must_use]
    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    #[must_use]
    pub fn file_url(&self) -> Option<&Url> {
        self.file_url.as_ref()
    }
}

//
// ─── PROJECT ───────────────────────────────────────────────────────────────────
//

/// A showcased project as persisted in the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    user_id: UserId,
    draft: ProjectDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Rehydrates a project from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: ProjectId,
        user_id: UserId,
        draft: ProjectDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            draft,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ProjectId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.draft.title()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.draft.description()
    }

    #[must_use]
    pub fn github_url(&self) -> Option<&Url> {
        self.draft.github_url()
    }

    #[must_use]
    pub fn live_url(&self) -> Option<&Url> {
        self.draft.live_url()
    }

    #[must_use]
    pub fn technologies(&self) -> &[String] {
        self.draft.technologies()
    }

    #[must_use]
    pub fn file_url(&self) -> Option<&Url> {
        self.draft.file_url()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_rejects_empty_title() {
        let err = ProjectDraft::new("  ", "desc", None, None, vec![], None).unwrap_err();
        assert_eq!(err, ProjectError::EmptyTitle);
    }

    #[test]
    fn draft_trims_and_filters_technologies() {
        let draft = ProjectDraft::new(
            "  RAG Chatbot  ",
            "A retrieval-augmented chatbot.",
            None,
            None,
            vec!["  Python ".into(), String::new(), "FastAPI".into()],
            None,
        )
        .unwrap();
        assert_eq!(draft.title(), "RAG Chatbot");
        assert_eq!(draft.technologies(), ["Python", "FastAPI"]);
    }

    #[test]
    fn parse_technologies_splits_csv() {
        let tags = ProjectDraft::parse_technologies("Python, FastAPI , , LlamaIndex");
        assert_eq!(tags, ["Python", "FastAPI", "LlamaIndex"]);
    }

    #[test]
    fn parse_url_treats_blank_as_none() {
        assert_eq!(ProjectDraft::parse_url("github_url", "   ").unwrap(), None);
        let url = ProjectDraft::parse_url("github_url", "https://github.com/me/repo")
            .unwrap()
            .unwrap();
        assert_eq!(url.host_str(), Some("github.com"));
    }

    #[test]
    fn parse_url_names_the_field_on_failure() {
        let err = ProjectDraft::parse_url("live_url", "not a url").unwrap_err();
        assert!(matches!(
            err,
            ProjectError::InvalidUrl {
                field: "live_url",
                ..
            }
        ));
    }
}
