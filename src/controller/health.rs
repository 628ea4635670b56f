use axum::http::StatusCode;

/// Liveness probe for the hosting platform.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
