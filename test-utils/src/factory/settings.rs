//! Factories for the per-guild settings tables.
//!
//! The three settings tables share one shape (`guild_id` + JSON `settings`), so these
//! helpers take the raw JSON payload directly.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub async fn create_server_settings(
    db: &DatabaseConnection,
    guild_id: &str,
    settings: serde_json::Value,
) -> Result<entity::server_settings::Model, DbErr> {
    entity::server_settings::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        settings: ActiveValue::Set(settings),
    }
    .insert(db)
    .await
}

pub async fn create_moderation_settings(
    db: &DatabaseConnection,
    guild_id: &str,
    settings: serde_json::Value,
) -> Result<entity::moderation_settings::Model, DbErr> {
    entity::moderation_settings::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        settings: ActiveValue::Set(settings),
    }
    .insert(db)
    .await
}

pub async fn create_command_settings(
    db: &DatabaseConnection,
    guild_id: &str,
    settings: serde_json::Value,
) -> Result<entity::command_settings::Model, DbErr> {
    entity::command_settings::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        settings: ActiveValue::Set(settings),
    }
    .insert(db)
    .await
}
