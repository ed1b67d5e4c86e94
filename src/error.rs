//! Error types shared by the client, credential and startup layers

use thiserror::Error;

/// Errors returned by the Azure DevOps REST client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the token (HTTP 401)
    #[error("401 Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success status
    #[error("request to {endpoint} failed with status {status}: {message}")]
    Status {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// Connection, TLS or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was empty, not JSON, or missing a required field
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The token cannot be sent as a header value
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl ApiError {
    /// Whether this error means the token was rejected.
    ///
    /// Besides the dedicated variant, any error whose text carries a 401
    /// status counts, so wrapped transport errors are recognised too.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Unauthorized(_) => true,
            Self::Status { status, .. } => *status == 401,
            other => other.to_string().contains("401"),
        }
    }
}

/// Errors raised while obtaining organization, project or token
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0} cannot be empty")]
    EmptyInput(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("secret store error: {0}")]
    Store(String),
}

/// Errors that end the run before the dashboard is shown
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("PAT invalid or expired after {attempts} attempts. Run again to enter a new PAT.")]
    AuthAttemptsExhausted { attempts: u32 },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_auth_failure() {
        assert!(ApiError::Unauthorized("expired".to_string()).is_auth_failure());
    }

    #[test]
    fn test_status_401_is_auth_failure() {
        let err = ApiError::Status {
            status: 401,
            endpoint: "git/repositories".to_string(),
            message: String::new(),
        };
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_other_status_is_not_auth_failure() {
        let err = ApiError::Status {
            status: 404,
            endpoint: "git/repositories".to_string(),
            message: "Resource not found".to_string(),
        };
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_malformed_with_401_text_is_auth_failure() {
        let err = ApiError::Malformed("upstream said 401".to_string());
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_malformed_without_401_is_not_auth_failure() {
        let err = ApiError::Malformed("empty response".to_string());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_exhausted_message_mentions_pat_invalid() {
        let err = StartupError::AuthAttemptsExhausted { attempts: 2 };
        assert!(err.to_string().contains("PAT invalid"));
    }

    #[test]
    fn test_empty_input_message() {
        let err = CredentialError::EmptyInput("PAT".to_string());
        assert_eq!(err.to_string(), "PAT cannot be empty");
    }
}
