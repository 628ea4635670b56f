use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommandSettings::Table)
                    .if_not_exists()
                    .col(string(CommandSettings::GuildId).primary_key())
                    .col(json_binary(CommandSettings::Settings).default("{}"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommandSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommandSettings {
    #[sea_orm(iden = "command_settings")]
    Table,
    GuildId,
    Settings,
}
