//! # Auth Commands
//!
//! Login issues a session token, logout revokes it.
//!
//! ```text
//! login {username, password}
//!      │
//!      ▼
//! AdminGate::verify ── false ──► UNAUTHORIZED "Invalid credentials. Try again."
//!      │ true                    (nothing issued, caller stays logged out)
//!      ▼
//! SessionState::open ──► { token, username }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use knitcraft_core::CoreError;

use crate::error::ApiError;
use crate::state::{AdminGate, AdminSession, SessionState};

/// Login form payload.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Send back as `Authorization: Bearer <token>` on admin requests.
    pub token: String,
    pub username: String,
}

/// Current session, as reported to the admin view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub username: String,
    /// RFC 3339 timestamp.
    pub logged_in_at: String,
}

/// Verifies credentials and opens a session.
pub async fn login(
    gate: &AdminGate,
    sessions: &SessionState,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    debug!(username = %request.username, "login command");

    if !gate.verify(&request.username, &request.password).await? {
        warn!(username = %request.username, "Failed admin login");
        return Err(CoreError::InvalidCredentials.into());
    }

    let session = sessions.open(&request.username);
    Ok(LoginResponse {
        token: session.token().to_string(),
        username: session.username().to_string(),
    })
}

/// Ends the presented session.
pub async fn logout(sessions: &SessionState, session: &AdminSession) -> Result<(), ApiError> {
    debug!(admin = %session.username(), "logout command");
    sessions.revoke(session.token());
    Ok(())
}

/// Reports who is logged in on the presented session.
pub fn session_status(session: &AdminSession) -> SessionDto {
    SessionDto {
        username: session.username().to_string(),
        logged_in_at: session.logged_in_at().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::state;
    use crate::error::ErrorCode;

    fn creds(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_with_seeded_admin() {
        let state = state().await;

        let response = login(&state.gate, &state.sessions, creds("admin", "admin123"))
            .await
            .unwrap();
        assert_eq!(response.username, "admin");

        let session = state.sessions.authorize(&response.token).unwrap();
        assert_eq!(session_status(&session).username, "admin");
    }

    #[tokio::test]
    async fn test_failed_logins_share_one_message() {
        let state = state().await;

        let wrong_password = login(&state.gate, &state.sessions, creds("admin", "nope"))
            .await
            .unwrap_err();
        let unknown_user = login(&state.gate, &state.sessions, creds("ghost", "admin123"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.code, ErrorCode::Unauthorized);
        assert_eq!(wrong_password.message, "Invalid credentials. Try again.");
        assert_eq!(state.sessions.active_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_revokes() {
        let state = state().await;
        let response = login(&state.gate, &state.sessions, creds("admin", "admin123"))
            .await
            .unwrap();
        let session = state.sessions.authorize(&response.token).unwrap();

        logout(&state.sessions, &session).await.unwrap();
        assert!(state.sessions.authorize(&response.token).is_none());
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let rendered = format!("{:?}", creds("admin", "admin123"));
        assert!(!rendered.contains("admin123"));
    }
}
