//! Flattening of per-repository pull request listings

use super::client::{RawPullRequest, RawReviewer};
use super::traits::ReviewApi;
use crate::error::ApiError;
use crate::state::{ReviewRequest, ReviewerDecision, Vote};

/// List every active pull request of `project`, sorted by id ascending
pub async fn list_open_requests(
    api: &dyn ReviewApi,
    project: &str,
) -> Result<Vec<ReviewRequest>, ApiError> {
    let repositories = api.list_repositories(project).await?;
    let mut requests = Vec::new();

    for repository in &repositories {
        let repository_name = repository.name.clone().unwrap_or_default();
        let pull_requests = api.list_pull_requests(&repository.id, project).await?;
        tracing::debug!(
            "{} active pull requests in {repository_name}",
            pull_requests.len()
        );
        requests.extend(
            pull_requests
                .into_iter()
                .map(|raw| to_review_request(raw, &repository_name)),
        );
    }

    requests.sort_by_key(|r| r.id);
    tracing::info!(
        "Fetched {} pull requests across {} repositories",
        requests.len(),
        repositories.len()
    );
    Ok(requests)
}

fn to_review_request(raw: RawPullRequest, repository_name: &str) -> ReviewRequest {
    let author = raw.created_by.unwrap_or_default();
    ReviewRequest {
        id: raw.pull_request_id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        author_display_name: author.display_name.unwrap_or_default(),
        author_id: author.id.unwrap_or_default(),
        is_draft: raw.is_draft.unwrap_or_default(),
        repository_name: repository_name.to_string(),
        reviewers: raw
            .reviewers
            .unwrap_or_default()
            .into_iter()
            .map(to_reviewer_decision)
            .collect(),
    }
}

fn to_reviewer_decision(raw: RawReviewer) -> ReviewerDecision {
    ReviewerDecision {
        id: raw.id.unwrap_or_default(),
        display_name: raw.display_name.unwrap_or_default(),
        is_required: raw.is_required.unwrap_or_default(),
        vote: Vote::from(raw.vote.unwrap_or_default()),
    }
}
