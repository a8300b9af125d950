//! Error types shared across the client.

use std::fmt::{Display, Formatter};

/// Shared client result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Client error enumeration covering every failure the user can see.
///
/// None of these are fatal: each resolves to a message and a return to the
/// last stable state (the draft order and session are left untouched unless
/// the variant says otherwise).
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// Durable credential store (keychain or file) failure.
    Storage(String),
    /// Login rejected or the authentication request failed.
    AuthenticationFailure(String),
    /// An authorized action was attempted without a credential.
    ///
    /// Raised locally; no request reaches the network.
    AuthorizationMissing(String),
    /// Network failure or undecodable response.
    Request(String),
    /// The server answered with a non-success status.
    Rejected(String),
    /// An order submission is already outstanding.
    SubmissionInFlight(String),
    /// Input refused before anything was sent.
    Validation(String),
}

impl AppError {
    /// Whether the user can simply try the same action again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_)
                | Self::Rejected(_)
                | Self::AuthenticationFailure(_)
                | Self::SubmissionInFlight(_)
        )
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
            Self::AuthenticationFailure(msg) => write!(f, "authentication failed: {msg}"),
            Self::AuthorizationMissing(msg) => write!(f, "not authorized: {msg}"),
            Self::Request(msg) => write!(f, "request failed: {msg}"),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
            Self::SubmissionInFlight(msg) => write!(f, "in flight: {msg}"),
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Request(format!("malformed response: {err}"))
    }
}

impl From<keyring::Error> for AppError {
    fn from(err: keyring::Error) -> Self {
        Self::Storage(format!("keychain: {err}"))
    }
}
