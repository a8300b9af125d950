//! Sign-in flow: authentication endpoint into the session manager.

use tracing::{info, warn};

use crate::api::{LoginRequest, PosApi};
use crate::session::SessionManager;
use crate::{AppError, Result};

/// Authenticate against the backend and log the session in.
///
/// Blank fields are refused before any request is made; otherwise both
/// fields are sent exactly as entered. Every backend failure collapses into
/// one generic message; the detail is only logged.
///
/// # Errors
///
/// Returns `AppError::AuthenticationFailure`; the session stays
/// unauthenticated.
pub async fn sign_in(
    api: &dyn PosApi,
    session: &SessionManager,
    username: &str,
    password: &str,
) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::AuthenticationFailure(
            "username and password are required".into(),
        ));
    }

    let request = LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    };

    match api.authenticate(&request).await {
        Ok(token) if !token.trim().is_empty() => {
            session.login(token).await;
            info!(username = %request.username, "signed in");
            Ok(())
        }
        Ok(_) => {
            warn!(username = %request.username, "authentication returned an empty token");
            Err(generic_failure())
        }
        Err(err) => {
            warn!(username = %request.username, %err, "authentication failed");
            Err(generic_failure())
        }
    }
}

/// Forget the credential.
pub async fn sign_out(session: &SessionManager) {
    session.logout().await;
}

fn generic_failure() -> AppError {
    AppError::AuthenticationFailure("there was an error logging in".into())
}
