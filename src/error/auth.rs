use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the authorization code for an access token failed.
    #[error("Failed to exchange OAuth authorization code: {0}")]
    TokenExchange(String),

    /// `DISCORD_CLIENT_ID` / `DISCORD_CLIENT_SECRET` are not configured.
    #[error("OAuth login is not configured")]
    OAuthNotConfigured,

    /// No authenticated user in the session.
    #[error("User is not logged in")]
    UserNotInSession,

    /// The user is logged in but may not access the requested resource.
    #[error("User {0} denied access: {1}")]
    AccessDenied(u64, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Details are logged at debug level; client-facing messages stay generic.
///
/// # Returns
/// - 400 Bad Request - CSRF and token exchange failures
/// - 401 Unauthorized - No user in session
/// - 403 Forbidden - Access denied
/// - 503 Service Unavailable - OAuth not configured
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::OAuthNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Login is not available on this deployment.",
            ),
            Self::UserNotInSession => (StatusCode::UNAUTHORIZED, "You need to log in first."),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have access to this resource.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
