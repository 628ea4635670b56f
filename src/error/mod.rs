//! Application errors.
//!
//! HTTP handlers return `AppError` and rely on its `IntoResponse` impl; bot commands turn it
//! into an ephemeral reply through `user_message`.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{auth::AuthError, config::ConfigError, internal::InternalError},
    model::api::ErrorDto,
};

#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or missing environment configuration.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Login and access-control failures; status codes come from `AuthError`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Stored data that cannot be decoded, such as a malformed id or JSON payload.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Boxed, `serenity::Error` is large.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// 404 with the message shown to the client.
    #[error("{0}")]
    NotFound(String),

    /// 400 with the message shown to the client.
    #[error("{0}")]
    BadRequest(String),

    /// 500; the message is logged only.
    #[error("{0}")]
    InternalError(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message safe to show to an end user, e.g. in a Discord reply.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::AuthErr(AuthError::AccessDenied(_, _)) => {
                "You do not have permission to do that.".to_string()
            }
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::AuthErr(err) => return err.into_response(),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            err => return InternalServerError(err).into_response(),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}

/// Logs any displayable error and answers with a generic 500 body.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let body = ErrorDto {
            error: "Internal server error".to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
