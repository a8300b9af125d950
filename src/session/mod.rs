//! Session lifecycle: restore at startup, login, logout.
//!
//! [`SessionManager`] is the single owner of the authentication state. It is
//! created once per process, shared behind an `Arc`, and consulted by every
//! component before an authorized request is built or a protected view is
//! shown. State is published through a `watch` channel so each transition
//! is one atomic replace.

pub mod guard;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};

use crate::models::session::Session;
use crate::{AppError, Result};

use self::guard::{GuardDecision, Route};
use self::store::CredentialStore;

/// Owner of the process-wide [`Session`].
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    restore_started: AtomicBool,
}

impl SessionManager {
    /// Create a manager in the initializing state.
    ///
    /// Nothing is read from `store` until [`restore`](Self::restore).
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::initial());
        Self {
            store,
            state,
            restore_started: AtomicBool::new(false),
        }
    }

    /// Seed the in-memory session from the durable store.
    ///
    /// Runs once per manager; later calls return the current snapshot
    /// without reading storage. A missing or unreadable credential settles
    /// the session as unauthenticated.
    pub async fn restore(&self) -> Session {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            warn!("session restore already performed, ignoring");
            return self.snapshot();
        }

        let store = Arc::clone(&self.store);
        let loaded = flatten(
            tokio::task::spawn_blocking(move || store.load())
                .instrument(info_span!("session_restore"))
                .await,
        );

        let next = match loaded {
            Ok(Some(credential)) => {
                info!("restored stored credential");
                Session::authenticated(credential)
            }
            Ok(None) => {
                info!("no stored credential");
                Session::anonymous()
            }
            Err(err) => {
                warn!(%err, "credential store unreadable, starting unauthenticated");
                Session::anonymous()
            }
        };

        // A login or logout that landed while the store was being read wins.
        self.state.send_if_modified(|session| {
            if session.is_initializing() {
                *session = next;
                true
            } else {
                false
            }
        });
        self.snapshot()
    }

    /// Enter the authenticated state with `credential`.
    ///
    /// The credential is taken verbatim; the server judges it on every
    /// request. An empty credential is ignored. The store write runs on a
    /// blocking task; a failed write is logged and the in-memory state still
    /// changes.
    pub async fn login(&self, credential: String) {
        if credential.is_empty() {
            warn!("refusing to log in with an empty credential");
            return;
        }

        let store = Arc::clone(&self.store);
        let token = credential.clone();
        let saved = tokio::task::spawn_blocking(move || store.save(&token))
            .instrument(info_span!("session_persist"))
            .await;
        if let Err(err) = flatten(saved) {
            warn!(%err, "failed to persist credential; session will not survive restart");
        }
        self.state.send_replace(Session::authenticated(credential));
        info!("logged in");
    }

    /// Return to the unauthenticated state and forget the stored credential.
    ///
    /// Idempotent. The store is cleared on a blocking task.
    pub async fn logout(&self) {
        let store = Arc::clone(&self.store);
        let cleared = tokio::task::spawn_blocking(move || store.clear())
            .instrument(info_span!("session_clear"))
            .await;
        if let Err(err) = flatten(cleared) {
            warn!(%err, "failed to clear stored credential");
        }
        self.state.send_replace(Session::anonymous());
        info!("logged out");
    }

    /// The credential to present as the bearer value, if any.
    #[must_use]
    pub fn current_credential(&self) -> Option<String> {
        self.state.borrow().credential().map(ToOwned::to_owned)
    }

    /// The credential, or `AuthorizationMissing` when unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthorizationMissing` if no credential is held.
    pub fn authorize(&self) -> Result<String> {
        self.current_credential()
            .ok_or_else(|| AppError::AuthorizationMissing("log in first".into()))
    }

    /// Current state without waiting for restore.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Wait until the startup restore has finished, then return the state.
    pub async fn ready(&self) -> Session {
        let mut rx = self.state.subscribe();
        // Clone out of the borrow before `rx` goes out of scope.
        let settled = rx
            .wait_for(|session| !session.is_initializing())
            .await
            .map(|session| Session::clone(&session));
        // The sender lives in `self`, so the channel cannot close here.
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Whether the user is authenticated; blocks while restore is pending.
    pub async fn is_authenticated(&self) -> bool {
        self.ready().await.is_authenticated()
    }

    /// Observe every future transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Route guard decision for `route` against the current state.
    #[must_use]
    pub fn guard(&self, route: Route) -> GuardDecision {
        guard::evaluate(&self.state.borrow(), route)
    }
}

fn flatten<T>(joined: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    joined.unwrap_or_else(|err| Err(AppError::Storage(format!("store task failed: {err}"))))
}
