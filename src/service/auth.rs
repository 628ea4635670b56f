//! Discord OAuth2 login used to gate access to transcripts.

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{auth::AuthError, AppError},
    model::api::SessionUserDto,
    state::OAuth2Client,
    util::parse::parse_snowflake,
};

const DISCORD_CURRENT_USER_URL: &str = "https://discord.com/api/users/@me";

/// Subset of Discord's `/users/@me` response.
#[derive(Debug, Deserialize)]
struct DiscordIdentity {
    id: String,
    username: String,
    global_name: Option<String>,
}

pub struct AuthService<'a> {
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> AuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Generates a Discord authorization URL and the CSRF token to validate the callback with.
    ///
    /// Only the `identify` scope is requested; guild membership is checked with the bot token.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url()
    }

    /// Exchanges an authorization code and fetches the identity of the logged-in user.
    ///
    /// # Returns
    /// - `Ok(SessionUserDto)` - Discord id and display name of the user
    /// - `Err(AppError::AuthErr(AuthError::TokenExchange))` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Fetching the user failed
    pub async fn callback(&self, authorization_code: String) -> Result<SessionUserDto, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let identity = self.fetch_identity(&token).await?;

        tracing::info!("User {} ({}) logged in", identity.username, identity.id);

        Ok(SessionUserDto {
            id: parse_snowflake(&identity.id)?,
            name: identity.global_name.unwrap_or(identity.username),
        })
    }

    async fn fetch_identity(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordIdentity, AppError> {
        let identity = self
            .http_client
            .get(DISCORD_CURRENT_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordIdentity>()
            .await?;

        Ok(identity)
    }
}
