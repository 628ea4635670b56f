use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModerationSettings::Table)
                    .if_not_exists()
                    .col(string(ModerationSettings::GuildId).primary_key())
                    .col(json_binary(ModerationSettings::Settings).default("{}"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModerationSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ModerationSettings {
    #[sea_orm(iden = "moderation_settings")]
    Table,
    GuildId,
    Settings,
}
