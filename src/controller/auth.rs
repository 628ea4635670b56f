use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, CsrfSession, ReturnToSession},
    service::auth::AuthService,
    state::{AppState, OAuth2Client},
};

#[derive(Deserialize)]
pub struct LoginParams {
    /// Local path to return to after login.
    pub return_to: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code from Discord for token exchange.
    pub code: String,
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    params: Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = oauth_client(&state)?;
    let auth_service = AuthService::new(&state.http_client, oauth_client);

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;
    ReturnToSession::new(&session)
        .replace(params.0.return_to.as_deref())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let oauth_client = oauth_client(&state)?;
    let auth_service = AuthService::new(&state.http_client, oauth_client);

    validate_csrf(&session, &params.0.state).await?;

    let return_to = ReturnToSession::new(&session).take().await?;
    let user = auth_service.callback(params.0.code).await?;
    AuthSession::new(&session).set_user(&user).await?;

    Ok(Redirect::temporary(return_to.as_deref().unwrap_or("/")))
}

pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok(Redirect::temporary("/"))
}

fn oauth_client(state: &AppState) -> Result<&OAuth2Client, AppError> {
    state
        .oauth_client
        .as_ref()
        .ok_or(AppError::AuthErr(AuthError::OAuthNotConfigured))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(state) if state == csrf_state => Ok(()),
        _ => Err(AppError::AuthErr(AuthError::CsrfValidationFailed)),
    }
}
