use axum::{routing::get, Router};

use crate::{
    controller::{
        auth::{callback, login, logout},
        health::health,
        transcript::view,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", get(logout))
        .route("/transcripts/{id}", get(view))
}
