//! Secret storage in the OS keychain
//!
//! Token, organization and project each live under their own service name
//! with a shared account, so they can be reset independently.

use super::prompt::Prompter;
use crate::error::CredentialError;
use keyring::Entry;

/// Account shared by every stored secret
pub const ACCOUNT: &str = "default";

/// Get/set/delete access to named secrets
#[cfg_attr(test, mockall::automock)]
pub trait SecretStore {
    /// Read a secret, `None` when nothing is stored
    fn get(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError>;

    fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), CredentialError>;

    /// Delete a secret. Deleting a missing secret is not an error.
    fn delete(&self, service: &str, account: &str) -> Result<(), CredentialError>;
}

/// The values this tool keeps in the secret store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Token,
    Organization,
    Project,
}

impl SecretKind {
    pub const ALL: [SecretKind; 3] = [Self::Token, Self::Organization, Self::Project];

    pub fn service(&self) -> &'static str {
        match self {
            Self::Token => "azure-devops-tui",
            Self::Organization => "azure-devops-tui-org",
            Self::Project => "azure-devops-tui-project",
        }
    }

    /// Short name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Token => "PAT",
            Self::Organization => "organization",
            Self::Project => "project",
        }
    }

    pub fn prompt_message(&self) -> &'static str {
        match self {
            Self::Token => "Enter your Azure DevOps Personal Access Token (PAT): ",
            Self::Organization => "Enter your Azure DevOps organization: ",
            Self::Project => "Enter your Azure DevOps project: ",
        }
    }

    /// Tokens are read without echo
    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Token)
    }
}

/// Secret store backed by the platform keychain
#[derive(Debug, Default)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry(service: &str, account: &str) -> Result<Entry, CredentialError> {
        Entry::new(service, account).map_err(|e| {
            CredentialError::Store(format!("failed to open keyring entry {service}: {e}"))
        })
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>, CredentialError> {
        match Self::entry(service, account)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError::Store(format!(
                "failed to read {service}: {e}"
            ))),
        }
    }

    fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), CredentialError> {
        Self::entry(service, account)?
            .set_password(secret)
            .map_err(|e| CredentialError::Store(format!("failed to store {service}: {e}")))
    }

    fn delete(&self, service: &str, account: &str) -> Result<(), CredentialError> {
        match Self::entry(service, account)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialError::Store(format!(
                "failed to delete {service}: {e}"
            ))),
        }
    }
}

/// Prompt for `kind` and persist the answer
pub fn prompt_and_store(
    store: &dyn SecretStore,
    prompter: &dyn Prompter,
    kind: SecretKind,
) -> Result<String, CredentialError> {
    let value = if kind.is_masked() {
        prompter.prompt_masked(kind.prompt_message(), kind.label())?
    } else {
        prompter.prompt_plain(kind.prompt_message(), kind.label())?
    };
    store.set(kind.service(), ACCOUNT, &value)?;
    tracing::debug!("Stored new {}", kind.label());
    Ok(value)
}

/// Return the stored value for `kind`, prompting and persisting when absent or empty
pub fn ensure_secret(
    store: &dyn SecretStore,
    prompter: &dyn Prompter,
    kind: SecretKind,
) -> Result<String, CredentialError> {
    match store.get(kind.service(), ACCOUNT) {
        Ok(Some(value)) if !value.is_empty() => return Ok(value),
        Ok(_) => {}
        Err(err) => tracing::warn!("Could not read stored {}: {err}", kind.label()),
    }
    prompt_and_store(store, prompter, kind)
}

/// Delete every stored secret, returning the failures
pub fn reset_all(store: &dyn SecretStore) -> Vec<(SecretKind, CredentialError)> {
    SecretKind::ALL
        .into_iter()
        .filter_map(|kind| {
            store
                .delete(kind.service(), ACCOUNT)
                .err()
                .map(|err| (kind, err))
        })
        .collect()
}
