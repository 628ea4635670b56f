//! Repository for general guild configuration (`server_settings`).

use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{
    error::AppError,
    model::settings::{ServerSettings, SettingsPayload},
};

pub struct ServerSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the stored settings for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(settings))` - A row exists and its payload is valid
    /// - `Ok(None)` - The guild has never been configured
    /// - `Err(AppError)` - Database error or malformed payload
    pub async fn get(&self, guild_id: &str) -> Result<Option<ServerSettings>, AppError> {
        let entity = entity::prelude::ServerSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity
            .map(|e| ServerSettings::from_json(e.settings))
            .transpose()?)
    }

    /// Gets the stored settings or the defaults for an unconfigured guild.
    pub async fn get_or_default(&self, guild_id: &str) -> Result<ServerSettings, AppError> {
        Ok(self.get(guild_id).await?.unwrap_or_default())
    }

    /// Inserts or replaces the settings row for a guild.
    pub async fn upsert(
        &self,
        guild_id: &str,
        settings: &ServerSettings,
    ) -> Result<ServerSettings, AppError> {
        let model = entity::server_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            settings: ActiveValue::Set(settings.to_json()?),
        };
        let entity = entity::prelude::ServerSettings::insert(model)
            .on_conflict(
                OnConflict::column(entity::server_settings::Column::GuildId)
                    .update_column(entity::server_settings::Column::Settings)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(ServerSettings::from_json(entity.settings)?)
    }
}
