//! Credential store backend: where the session token survives restarts.
//!
//! `StoreBackend` is both the `backend` key of the `[credential_store]`
//! config table and a CLI value. It decides which
//! [`CredentialStore`](crate::session::store::CredentialStore) the client
//! builds at startup.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Durable storage selector for the bearer credential.
///
/// Defaults to [`StoreBackend::File`], which works on headless hosts that
/// have no keychain daemon.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// OS keychain (kernel keyutils on Linux, macOS Keychain, Windows Credential Manager).
    Keyring,
    /// Single token file under the user's home directory. Default.
    #[default]
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
}
