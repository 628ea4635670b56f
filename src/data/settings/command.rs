//! Repository for per-command configuration (`command_settings`).

use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{
    error::AppError,
    model::settings::{CommandSettings, SettingsPayload},
};

pub struct CommandSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: &str) -> Result<Option<CommandSettings>, AppError> {
        let entity = entity::prelude::CommandSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity
            .map(|e| CommandSettings::from_json(e.settings))
            .transpose()?)
    }

    pub async fn get_or_default(&self, guild_id: &str) -> Result<CommandSettings, AppError> {
        Ok(self.get(guild_id).await?.unwrap_or_default())
    }

    /// Inserts or replaces the settings row for a guild.
    pub async fn upsert(
        &self,
        guild_id: &str,
        settings: &CommandSettings,
    ) -> Result<CommandSettings, AppError> {
        let model = entity::command_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            settings: ActiveValue::Set(settings.to_json()?),
        };
        let entity = entity::prelude::CommandSettings::insert(model)
            .on_conflict(
                OnConflict::column(entity::command_settings::Column::GuildId)
                    .update_column(entity::command_settings::Column::Settings)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(CommandSettings::from_json(entity.settings)?)
    }
}
