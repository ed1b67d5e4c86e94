//! Credential storage, prompting and connection recovery

mod prompt;
mod retry;
mod store;

pub use prompt::{Prompter, TerminalPrompter};
pub use retry::CredentialRetryMachine;
pub use store::{ensure_secret, reset_all, KeyringStore, SecretKind, SecretStore};

#[cfg(test)]
pub(crate) use prompt::MockPrompter;
#[cfg(test)]
pub(crate) use store::memory::MemoryStore;
