//! Shared state for the transcript viewer and login routes.

use std::sync::Arc;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;

use crate::config::Config;

/// Discord OAuth client; only the auth URL and token URL are configured.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Shared resources, cloned into each request by Axum's state extraction.
///
/// Every field is cheap to clone: the database pool, `reqwest::Client` and Discord `Http`
/// are reference counted internally or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    /// Client for Discord API calls made on behalf of logged-in users.
    pub http_client: reqwest::Client,
    /// `None` when OAuth credentials are not configured.
    pub oauth_client: Option<OAuth2Client>,
    /// Bot-token REST client, used to look up guild members for access checks.
    pub discord_http: Arc<Http>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        http_client: reqwest::Client,
        oauth_client: Option<OAuth2Client>,
        discord_http: Arc<Http>,
    ) -> Self {
        Self {
            db,
            config,
            http_client,
            oauth_client,
            discord_http,
        }
    }
}
