//! Session value type and its lifecycle states.

use std::fmt;

use serde::Serialize;

/// Authentication state observed by every view and request.
///
/// `is_authenticated` is derived from the credential, so the two can never
/// disagree. `initializing` is true only between process start and the end
/// of the single restore attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    credential: Option<String>,
    initializing: bool,
}

impl Session {
    /// State at process start, before the durable store has been read.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            credential: None,
            initializing: true,
        }
    }

    /// Settled, unauthenticated state (after restore found nothing, or logout).
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            credential: None,
            initializing: false,
        }
    }

    /// Settled, authenticated state carrying `credential`.
    #[must_use]
    pub fn authenticated(credential: String) -> Self {
        Self {
            credential: Some(credential),
            initializing: false,
        }
    }

    /// True iff a credential is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// The bearer credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// True while the startup restore has not finished.
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.initializing
    }
}

// The credential is redacted so sessions can be logged.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("is_authenticated", &self.is_authenticated())
            .field("initializing", &self.initializing)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Serializable summary used by the `status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionStatus {
    /// Whether a credential is held.
    pub is_authenticated: bool,
    /// Whether the startup restore is still pending.
    pub initializing: bool,
}

impl From<&Session> for SessionStatus {
    fn from(session: &Session) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            initializing: session.is_initializing(),
        }
    }
}
