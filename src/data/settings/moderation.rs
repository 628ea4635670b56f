//! Repository for guild moderation configuration (`moderation_settings`).

use sea_orm::{sea_query::OnConflict, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{
    error::AppError,
    model::settings::{ModerationSettings, SettingsPayload},
};

pub struct ModerationSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ModerationSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: &str) -> Result<Option<ModerationSettings>, AppError> {
        let entity = entity::prelude::ModerationSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity
            .map(|e| ModerationSettings::from_json(e.settings))
            .transpose()?)
    }

    pub async fn get_or_default(&self, guild_id: &str) -> Result<ModerationSettings, AppError> {
        Ok(self.get(guild_id).await?.unwrap_or_default())
    }

    /// Inserts or replaces the settings row for a guild.
    pub async fn upsert(
        &self,
        guild_id: &str,
        settings: &ModerationSettings,
    ) -> Result<ModerationSettings, AppError> {
        let model = entity::moderation_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            settings: ActiveValue::Set(settings.to_json()?),
        };
        let entity = entity::prelude::ModerationSettings::insert(model)
            .on_conflict(
                OnConflict::column(entity::moderation_settings::Column::GuildId)
                    .update_column(entity::moderation_settings::Column::Settings)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        Ok(ModerationSettings::from_json(entity.settings)?)
    }
}
