//! Trait abstraction for the Azure DevOps client to enable mocking in tests

use super::client::{RawPullRequest, Repository};
use crate::error::ApiError;
use async_trait::async_trait;

/// Credentials and target of one connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub organization: String,
    pub project: String,
}

/// Read-only review-listing operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// List the repositories of a project
    async fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError>;

    /// List active pull requests of one repository
    async fn list_pull_requests(
        &self,
        repository_id: &str,
        project: &str,
    ) -> Result<Vec<RawPullRequest>, ApiError>;

    /// Resolve the id of the user owning the token
    async fn current_user_id(&self) -> Result<String, ApiError>;
}

/// Builds a client for a session
#[cfg_attr(test, mockall::automock)]
pub trait Connector {
    fn connect(&self, session: &Session) -> Result<Box<dyn ReviewApi>, ApiError>;
}
