//! Connection state machine with token recovery
//!
//! `NeedCredential -> Connecting -> {Ready, AuthFailed, FatalError}`. A rejected
//! token sends the machine back to `NeedCredential`, which then always asks
//! for a replacement and persists it. Attempts are bounded; any non-auth
//! error ends the run immediately.

use super::prompt::Prompter;
use super::store::{ensure_secret, prompt_and_store, SecretKind, SecretStore};
use crate::azure::{list_open_requests, Connector, ReviewApi, Session};
use crate::error::{ApiError, StartupError};
use crate::state::ReviewRequest;
use std::fmt;

/// Connection attempts allowed before giving up
pub const MAX_AUTH_ATTEMPTS: u32 = 2;

/// A validated session with its first listing result
pub struct Connected {
    pub session: Session,
    pub api: Box<dyn ReviewApi>,
    pub requests: Vec<ReviewRequest>,
}

impl fmt::Debug for Connected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connected")
            .field("organization", &self.session.organization)
            .field("project", &self.session.project)
            .field("requests", &self.requests.len())
            .finish_non_exhaustive()
    }
}

enum ConnectionState {
    /// `replace` discards whatever is stored and asks for a new token
    NeedCredential { replace: bool },
    Connecting(Session),
    AuthFailed(ApiError),
    Ready(Connected),
    FatalError(ApiError),
}

impl ConnectionState {
    fn name(&self) -> &'static str {
        match self {
            Self::NeedCredential { .. } => "NeedCredential",
            Self::Connecting(_) => "Connecting",
            Self::AuthFailed(_) => "AuthFailed",
            Self::Ready(_) => "Ready",
            Self::FatalError(_) => "FatalError",
        }
    }
}

pub struct CredentialRetryMachine<'a> {
    store: &'a dyn SecretStore,
    prompter: &'a dyn Prompter,
    connector: &'a dyn Connector,
    max_attempts: u32,
}

impl<'a> CredentialRetryMachine<'a> {
    pub fn new(
        store: &'a dyn SecretStore,
        prompter: &'a dyn Prompter,
        connector: &'a dyn Connector,
    ) -> Self {
        Self {
            store,
            prompter,
            connector,
            max_attempts: MAX_AUTH_ATTEMPTS,
        }
    }

    /// Drive the machine until it is `Ready` or gives up
    pub async fn run(&self, organization: &str, project: &str) -> Result<Connected, StartupError> {
        let mut failed_attempts = 0;
        let mut state = ConnectionState::NeedCredential { replace: false };

        loop {
            tracing::debug!("Connection state: {}", state.name());
            state = match state {
                ConnectionState::NeedCredential { replace } => {
                    let token = if replace {
                        prompt_and_store(self.store, self.prompter, SecretKind::Token)?
                    } else {
                        ensure_secret(self.store, self.prompter, SecretKind::Token)?
                    };
                    ConnectionState::Connecting(Session {
                        token,
                        organization: organization.to_string(),
                        project: project.to_string(),
                    })
                }
                ConnectionState::Connecting(session) => match self.connect(session).await {
                    Ok(connected) => ConnectionState::Ready(connected),
                    Err(err) if err.is_auth_failure() => ConnectionState::AuthFailed(err),
                    Err(err) => ConnectionState::FatalError(err),
                },
                ConnectionState::AuthFailed(err) => {
                    failed_attempts += 1;
                    tracing::warn!(
                        "Authentication failed (attempt {failed_attempts}/{}): {err}",
                        self.max_attempts
                    );
                    if failed_attempts >= self.max_attempts {
                        return Err(StartupError::AuthAttemptsExhausted {
                            attempts: failed_attempts,
                        });
                    }
                    eprintln!("PAT is invalid or expired. Please enter a new PAT.");
                    ConnectionState::NeedCredential { replace: true }
                }
                ConnectionState::Ready(connected) => return Ok(connected),
                ConnectionState::FatalError(err) => return Err(err.into()),
            };
        }
    }

    async fn connect(&self, session: Session) -> Result<Connected, ApiError> {
        let api = self.connector.connect(&session)?;
        let requests = list_open_requests(api.as_ref(), &session.project).await?;
        tracing::info!(
            "Connected to {}/{}",
            session.organization,
            session.project
        );
        Ok(Connected {
            session,
            api,
            requests,
        })
    }
}
