use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use url::form_urlencoded;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::auth::TranscriptGuard,
    service::transcript::TranscriptService,
    state::AppState,
};

/// Serves a stored transcript page.
///
/// # Returns
/// - `200 OK` - The transcript HTML, `accessed_at` updated
/// - `307 Temporary Redirect` - Not logged in, sent to login with a return path
/// - `403 Forbidden` - Neither the ticket opener nor a guild moderator
/// - `404 Not Found` - Unknown transcript id
pub async fn view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let transcript_service = TranscriptService::new(&state.db);

    let Some(transcript) = transcript_service.get(&id).await? else {
        return Err(AppError::NotFound("Transcript not found".to_string()));
    };

    match TranscriptGuard::new(&state, &session)
        .require(&transcript)
        .await
    {
        Ok(_) => {}
        Err(AppError::AuthErr(AuthError::UserNotInSession)) => {
            return Ok(Redirect::temporary(&login_redirect(&id)).into_response());
        }
        Err(e) => return Err(e),
    }

    let transcript = transcript_service
        .view(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Transcript not found".to_string()))?;

    Ok(Html(transcript.html).into_response())
}

fn login_redirect(transcript_id: &str) -> String {
    let return_to: String =
        form_urlencoded::byte_serialize(format!("/transcripts/{}", transcript_id).as_bytes())
            .collect();

    format!("/auth/login?return_to={}", return_to)
}
