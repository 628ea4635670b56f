//! Access control for transcript pages.

use serenity::all::{GuildId, UserId};
use tower_sessions::Session;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{api::SessionUserDto, transcript::Transcript},
    service::guild_config::GuildConfigService,
    state::AppState,
    util::parse::parse_snowflake,
};

pub struct TranscriptGuard<'a> {
    state: &'a AppState,
    session: &'a Session,
}

impl<'a> TranscriptGuard<'a> {
    pub fn new(state: &'a AppState, session: &'a Session) -> Self {
        Self { state, session }
    }

    /// Checks that the session user may read `transcript`.
    ///
    /// The ticket opener always may. Anyone else needs one of the guild's moderator roles,
    /// looked up through the bot's REST client.
    ///
    /// # Returns
    /// - `Ok(SessionUserDto)` - The permitted user
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::AccessDenied)` - The user is neither opener nor moderator
    pub async fn require(&self, transcript: &Transcript) -> Result<SessionUserDto, AppError> {
        let Some(user) = AuthSession::new(self.session).get_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let info = &transcript.ticket_info;
        if info.user_id == user.id.to_string() {
            return Ok(user);
        }

        let role_ids = self.member_role_ids(&info.guild_id, user.id).await?;
        let guild_config = GuildConfigService::new(&self.state.db, &self.state.config)
            .resolve(&info.guild_id)
            .await?;

        if guild_config.is_moderator(&role_ids) {
            Ok(user)
        } else {
            Err(AuthError::AccessDenied(
                user.id,
                format!("not a moderator of guild {}", info.guild_id),
            )
            .into())
        }
    }

    /// Role ids of the user in the guild, empty if they are not a member.
    async fn member_role_ids(&self, guild_id: &str, user_id: u64) -> Result<Vec<String>, AppError> {
        let guild_id = GuildId::new(parse_snowflake(guild_id)?);
        if user_id == 0 {
            return Ok(Vec::new());
        }

        match self
            .state
            .discord_http
            .get_member(guild_id, UserId::new(user_id))
            .await
        {
            Ok(member) => Ok(member.roles.iter().map(|role| role.get().to_string()).collect()),
            Err(e) => {
                tracing::debug!(
                    "Could not fetch member {} of guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}
