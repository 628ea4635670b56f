//! Type-safe session wrappers.
//!
//! Each struct wraps the same underlying `Session` but only exposes the keys of one concern:
//! - `AuthSession` - the logged-in Discord user
//! - `CsrfSession` - the OAuth2 CSRF state token
//! - `ReturnToSession` - where to send the user after logging in

use tower_sessions::Session;

use crate::{error::AppError, model::api::SessionUserDto};

const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_RETURN_TO: &str = "auth:return_to";

/// Authentication state of the session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated user after a successful OAuth callback.
    ///
    /// The session id is cycled to prevent session fixation.
    pub async fn set_user(&self, user: &SessionUserDto) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// # Returns
    /// - `Ok(Some(user))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user(&self) -> Result<Option<SessionUserDto>, AppError> {
        Ok(self.session.get::<SessionUserDto>(SESSION_AUTH_USER).await?)
    }

    /// Removes all session data, used on logout.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// CSRF token storage for the OAuth flow.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token so each token validates at most one callback.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// Post-login redirect target.
pub struct ReturnToSession<'a> {
    session: &'a Session,
}

impl<'a> ReturnToSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores `path` if it is a local path; anything else is ignored.
    pub async fn set(&self, path: &str) -> Result<(), AppError> {
        if is_local_path(path) {
            self.session
                .insert(SESSION_AUTH_RETURN_TO, path.to_string())
                .await?;
        }
        Ok(())
    }

    /// Replaces the stored path for a new login attempt.
    ///
    /// A path left by an abandoned login is dropped first, so a login without a usable
    /// `path` returns to `/`.
    pub async fn replace(&self, path: Option<&str>) -> Result<(), AppError> {
        self.session.remove::<String>(SESSION_AUTH_RETURN_TO).await?;
        match path {
            Some(path) => self.set(path).await,
            None => Ok(()),
        }
    }

    /// Retrieves and removes the stored path.
    pub async fn take(&self) -> Result<Option<String>, AppError> {
        let path = self.session.remove(SESSION_AUTH_RETURN_TO).await?;
        Ok(path)
    }
}

/// Only same-origin absolute paths are allowed, which rules out open redirects such as
/// `//evil.example` or `https://evil.example`.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
