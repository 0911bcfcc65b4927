use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use thiserror::Error;
use url::Url;

use crate::repository::{
    CompletionRepository, JournalRepository, ProjectRepository, Storage, SyncError,
};

mod completion_repo;
mod journal_repo;
mod project_repo;
mod rows;

/// Connection settings for the hosted table store's REST endpoint.
#[derive(Debug, Clone)]
pub struct RestConfig {
    base_url: Url,
    api_key: String,
    access_token: String,
    timeout: Duration,
}

impl RestConfig {
    /// Creates a config with the default 10 second request timeout.
    ///
    /// `api_key` identifies the application; `access_token` is the
    /// authenticated user's bearer credential.
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RestInitError {
    #[error("base url cannot hold table paths: {0}")]
    BadBaseUrl(Url),

    #[error("invalid credential header")]
    BadCredential,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// PostgREST-style adapter for the hosted `completions`, `projects`, and
/// `daily_journals` tables.
///
/// Every request carries the api key and the user's bearer token and runs
/// under a hard timeout, so a dead network surfaces as `SyncError::Timeout`
/// instead of hanging the session.
#[derive(Clone)]
pub struct RestRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl RestRepository {
    /// Builds the adapter, baking credentials into default headers.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError` if the base url cannot carry table paths, a
    /// credential is not a valid header value, or the HTTP client cannot be
    /// constructed.
    pub fn connect(config: RestConfig) -> Result<Self, RestInitError> {
        if config.base_url.cannot_be_a_base() {
            return Err(RestInitError::BadBaseUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).map_err(|_| RestInitError::BadCredential)?,
        );
        let bearer = format!("Bearer {}", config.access_token);
        let mut auth = HeaderValue::from_str(&bearer).map_err(|_| RestInitError::BadCredential)?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SyncError::Connection("base url cannot hold table paths".into()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, SyncError> {
        let url = self.table_url(table)?;
        Ok(self.client.request(method, url))
    }
}

/// Maps a transport-level failure into the sync taxonomy.
fn transport(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Timeout
    } else if e.is_decode() {
        SyncError::Serialization(e.to_string())
    } else {
        SyncError::Connection(e.to_string())
    }
}

/// Rejects non-success responses, folding auth failures into their own
/// variant so callers can distinguish an expired session from a dead link.
fn check_status(resp: Response) -> Result<Response, SyncError> {
    match resp.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::Unauthorized),
        StatusCode::NOT_FOUND => Err(SyncError::NotFound),
        status if !status.is_success() => {
            Err(SyncError::Connection(format!("unexpected status {status}")))
        }
        _ => Ok(resp),
    }
}

fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

impl Storage {
    /// Builds a `Storage` backed by the hosted REST endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RestInitError` if the adapter cannot be constructed.
    pub fn rest(config: RestConfig) -> Result<Self, RestInitError> {
        let repo = RestRepository::connect(config)?;
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo.clone());
        let projects: Arc<dyn ProjectRepository> = Arc::new(repo.clone());
        let journals: Arc<dyn JournalRepository> = Arc::new(repo);
        Ok(Self {
            completions,
            projects,
            journals,
        })
    }
}
