//! HTTP client for the Azure DevOps REST API
//!
//! Authenticates with a personal access token sent as the password half of
//! basic authentication (empty user name). Only the read-only endpoints the
//! dashboard needs are covered.

use super::traits::{Connector, ReviewApi, Session};
use crate::config::TuiConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// REST API version sent with every request
const API_VERSION: &str = "7.0";

/// Repository entry from `git/repositories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
}

/// Identity reference (author of a pull request)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdentity {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// Reviewer entry of a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviewer {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub is_required: Option<bool>,
    pub vote: Option<i32>,
}

/// Pull request as returned by `git/repositories/{id}/pullrequests`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPullRequest {
    pub pull_request_id: Option<i64>,
    pub title: Option<String>,
    pub is_draft: Option<bool>,
    pub created_by: Option<RawIdentity>,
    pub reviewers: Option<Vec<RawReviewer>>,
}

/// `{"count": n, "value": [...]}` list envelope
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: Option<String>,
}

/// Endpoints and limits shared by every client
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub profile_base_url: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &TuiConfig) -> Self {
        Self {
            api_base_url: config.api_base_url().trim_end_matches('/').to_string(),
            profile_base_url: config.profile_base_url().trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        }
    }
}

/// Azure DevOps client bound to one session
#[derive(Debug, Clone)]
pub struct AzureDevOpsClient {
    http: Client,
    settings: ClientSettings,
    session: Session,
}

impl AzureDevOpsClient {
    /// Create a new client
    pub fn new(session: Session, settings: ClientSettings) -> Result<Self, ApiError> {
        HeaderValue::from_str(&session.token)
            .map_err(|_| ApiError::InvalidToken("token contains invalid characters".to_string()))?;

        let http = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            http,
            settings,
            session,
        })
    }

    fn api_url(&self, project: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/_apis/{}",
            self.settings.api_base_url, self.session.organization, project, path
        )
    }

    fn profile_url(&self) -> String {
        format!(
            "{}/{}/_apis/profile/profiles/me",
            self.settings.profile_base_url, self.session.organization
        )
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        tracing::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .basic_auth("", Some(&self.session.token))
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        endpoint: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self.get(url, query).await?;
        let status = response.status();

        if status.is_success() && status != StatusCode::NON_AUTHORITATIVE_INFORMATION {
            let body = response.text().await?;
            let envelope: ListEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
                ApiError::Malformed(format!("failed to parse {endpoint} response: {e}"))
            })?;
            return Ok(envelope.value);
        }

        Err(Self::status_error(response, endpoint).await)
    }

    /// Map a failed response to an error, keeping the server's message when present
    async fn status_error(response: Response, endpoint: &str) -> ApiError {
        let status = response.status();

        // 203 carries a sign-in page instead of JSON when the token is not accepted
        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::NON_AUTHORITATIVE_INFORMATION
        {
            return ApiError::Unauthorized(format!("{endpoint}: token invalid or expired"));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| match status {
                StatusCode::FORBIDDEN => "Access denied".to_string(),
                StatusCode::NOT_FOUND => "Resource not found".to_string(),
                _ => body,
            });

        ApiError::Status {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            message,
        }
    }
}

#[async_trait]
impl ReviewApi for AzureDevOpsClient {
    async fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError> {
        let url = self.api_url(project, "git/repositories");
        self.get_list(&url, &[("api-version", API_VERSION)], "git/repositories")
            .await
    }

    async fn list_pull_requests(
        &self,
        repository_id: &str,
        project: &str,
    ) -> Result<Vec<RawPullRequest>, ApiError> {
        let url = self.api_url(
            project,
            &format!("git/repositories/{repository_id}/pullrequests"),
        );
        self.get_list(
            &url,
            &[
                ("searchCriteria.status", "active"),
                ("api-version", API_VERSION),
            ],
            "git/pullrequests",
        )
        .await
    }

    async fn current_user_id(&self) -> Result<String, ApiError> {
        let response = self
            .get(&self.profile_url(), &[("api-version", API_VERSION)])
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized(
                "failed to fetch user profile".to_string(),
            ));
        }
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: "profile".to_string(),
                message: "failed to fetch user profile".to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ApiError::Malformed(
                "empty response from user profile API".to_string(),
            ));
        }

        let profile: Profile = serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(format!("failed to parse user profile JSON: {e}")))?;

        profile
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Malformed("user ID not found in profile response".to_string()))
    }
}

/// Connector producing real HTTP clients
pub struct AzureConnector {
    settings: ClientSettings,
}

impl AzureConnector {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

impl Connector for AzureConnector {
    fn connect(&self, session: &Session) -> Result<Box<dyn ReviewApi>, ApiError> {
        let client = AzureDevOpsClient::new(session.clone(), self.settings.clone())?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// `base64(":pat")`
    const BASIC_PAT: &str = "Basic OnBhdA==";

    fn client_for(server: &MockServer) -> AzureDevOpsClient {
        let settings = ClientSettings {
            api_base_url: server.uri(),
            profile_base_url: server.uri(),
            timeout: Duration::from_secs(5),
        };
        let session = Session {
            token: "pat".to_string(),
            organization: "org".to_string(),
            project: "proj".to_string(),
        };
        AzureDevOpsClient::new(session, settings).unwrap()
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let session = Session {
            token: "bad\ntoken".to_string(),
            organization: "org".to_string(),
            project: "proj".to_string(),
        };
        let settings = ClientSettings::from_config(&TuiConfig::default());
        let result = AzureDevOpsClient::new(session, settings);
        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[test]
    fn test_settings_strip_trailing_slash() {
        let config = TuiConfig {
            api_base_url: Some("http://localhost:9000/".to_string()),
            ..Default::default()
        };
        let settings = ClientSettings::from_config(&config);
        assert_eq!(settings.api_base_url, "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_list_repositories_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/proj/_apis/git/repositories"))
            .and(query_param("api-version", "7.0"))
            .and(header("authorization", BASIC_PAT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "value": [
                    {"id": "r-1", "name": "web"},
                    {"id": "r-2"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for(&server).list_repositories("proj").await.unwrap();

        assert_eq!(
            repos,
            vec![
                Repository {
                    id: "r-1".to_string(),
                    name: Some("web".to_string()),
                },
                Repository {
                    id: "r-2".to_string(),
                    name: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_pull_requests_filters_active() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/proj/_apis/git/repositories/r-1/pullrequests"))
            .and(query_param("searchCriteria.status", "active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{
                    "pullRequestId": 42,
                    "title": "Add login",
                    "isDraft": true,
                    "createdBy": {"id": "u-1", "displayName": "Ada"},
                    "reviewers": [
                        {"id": "u-2", "displayName": "Linus", "isRequired": true, "vote": 10}
                    ]
                }]
            })))
            .mount(&server)
            .await;

        let prs = client_for(&server)
            .list_pull_requests("r-1", "proj")
            .await
            .unwrap();

        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].pull_request_id, Some(42));
        assert_eq!(prs[0].is_draft, Some(true));
        let reviewers = prs[0].reviewers.as_ref().unwrap();
        assert_eq!(reviewers[0].vote, Some(10));
        assert_eq!(reviewers[0].is_required, Some(true));
    }

    #[tokio::test]
    async fn test_list_with_missing_value_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .mount(&server)
            .await;

        let repos = client_for(&server).list_repositories("proj").await.unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_401_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_repositories("proj")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_203_sign_in_page_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(203).set_body_string("<html>sign in</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_repositories("proj")
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_404_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "TF200016: project does not exist"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list_repositories("proj")
            .await
            .unwrap_err();
        match err {
            ApiError::Status {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "TF200016: project does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_current_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/_apis/profile/profiles/me"))
            .and(header("authorization", BASIC_PAT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u-1",
                "displayName": "Ada"
            })))
            .mount(&server)
            .await;

        let id = client_for(&server).current_user_id().await.unwrap();
        assert_eq!(id, "u-1");
    }

    #[tokio::test]
    async fn test_current_user_id_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = client_for(&server).current_user_id().await.unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }

    #[tokio::test]
    async fn test_current_user_id_missing_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": ""})))
            .mount(&server)
            .await;

        let err = client_for(&server).current_user_id().await.unwrap_err();
        assert!(err.to_string().contains("user ID not found"));
    }

    #[tokio::test]
    async fn test_current_user_id_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).current_user_id().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_current_user_id_non_200_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).current_user_id().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_connector_builds_client() {
        let connector = AzureConnector::new(ClientSettings::from_config(&TuiConfig::default()));
        let session = Session {
            token: "pat".to_string(),
            organization: "org".to_string(),
            project: "proj".to_string(),
        };
        assert!(connector.connect(&session).is_ok());
    }
}
