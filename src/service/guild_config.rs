//! Effective per-guild configuration.
//!
//! Environment variables provide bot-wide defaults; the per-guild settings tables override
//! them. Moderator roles are the union of both sources.

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::settings::{
        CommandSettingsRepository, ModerationSettingsRepository, ServerSettingsRepository,
    },
    error::AppError,
    model::settings::{CommandSettings, ModerationSettings, ServerSettings},
};

/// Configuration in force for one guild after merging defaults and stored settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveGuildConfig {
    pub ticket_category_id: Option<String>,
    pub transcript_channel_id: Option<String>,
    pub ticket_channel_name_template: String,
    pub moderator_role_ids: Vec<String>,
}

impl EffectiveGuildConfig {
    /// Merges environment defaults with a guild's stored settings.
    pub fn merge(
        config: &Config,
        server: &ServerSettings,
        moderation: &ModerationSettings,
    ) -> Self {
        let mut moderator_role_ids = config.moderator_role_ids.clone();
        for role_id in &moderation.moderator_role_ids {
            if !moderator_role_ids.contains(role_id) {
                moderator_role_ids.push(role_id.clone());
            }
        }

        Self {
            ticket_category_id: server
                .ticket_category_id
                .clone()
                .or_else(|| config.ticket_category_id.clone()),
            transcript_channel_id: server
                .transcript_channel_id
                .clone()
                .or_else(|| config.transcript_channel_id.clone()),
            ticket_channel_name_template: server
                .ticket_channel_name_template
                .clone()
                .unwrap_or_else(|| config.ticket_channel_name_template.clone()),
            moderator_role_ids,
        }
    }

    /// Whether a member holding `role_ids` counts as a moderator in this guild.
    pub fn is_moderator<S: AsRef<str>>(&self, role_ids: &[S]) -> bool {
        role_ids
            .iter()
            .any(|role| self.moderator_role_ids.iter().any(|m| m == role.as_ref()))
    }
}

pub struct GuildConfigService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> GuildConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Resolves the effective configuration for a guild.
    ///
    /// Reads never create settings rows.
    pub async fn resolve(&self, guild_id: &str) -> Result<EffectiveGuildConfig, AppError> {
        let server = ServerSettingsRepository::new(self.db)
            .get_or_default(guild_id)
            .await?;
        let moderation = ModerationSettingsRepository::new(self.db)
            .get_or_default(guild_id)
            .await?;

        Ok(EffectiveGuildConfig::merge(self.config, &server, &moderation))
    }

    pub async fn command_settings(&self, guild_id: &str) -> Result<CommandSettings, AppError> {
        CommandSettingsRepository::new(self.db)
            .get_or_default(guild_id)
            .await
    }

    pub async fn is_command_enabled(
        &self,
        guild_id: &str,
        command: &str,
    ) -> Result<bool, AppError> {
        Ok(self.command_settings(guild_id).await?.is_enabled(command))
    }

    /// Applies `update` to the guild's server settings and stores the result.
    ///
    /// Read-modify-write without locking: concurrent updates of the same guild are
    /// last-writer-wins.
    pub async fn update_server_settings<F, R>(
        &self,
        guild_id: &str,
        update: F,
    ) -> Result<(ServerSettings, R), AppError>
    where
        F: FnOnce(&mut ServerSettings) -> R,
    {
        let repo = ServerSettingsRepository::new(self.db);
        let mut settings = repo.get_or_default(guild_id).await?;
        let result = update(&mut settings);
        let stored = repo.upsert(guild_id, &settings).await?;

        Ok((stored, result))
    }

    pub async fn update_moderation_settings<F, R>(
        &self,
        guild_id: &str,
        update: F,
    ) -> Result<(ModerationSettings, R), AppError>
    where
        F: FnOnce(&mut ModerationSettings) -> R,
    {
        let repo = ModerationSettingsRepository::new(self.db);
        let mut settings = repo.get_or_default(guild_id).await?;
        let result = update(&mut settings);
        let stored = repo.upsert(guild_id, &settings).await?;

        Ok((stored, result))
    }

    pub async fn update_command_settings<F, R>(
        &self,
        guild_id: &str,
        update: F,
    ) -> Result<(CommandSettings, R), AppError>
    where
        F: FnOnce(&mut CommandSettings) -> R,
    {
        let repo = CommandSettingsRepository::new(self.db);
        let mut settings = repo.get_or_default(guild_id).await?;
        let result = update(&mut settings);
        let stored = repo.upsert(guild_id, &settings).await?;

        Ok((stored, result))
    }
}
