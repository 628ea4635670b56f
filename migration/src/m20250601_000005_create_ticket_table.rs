use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(string(Ticket::Id).primary_key())
                    .col(string(Ticket::GuildId))
                    .col(string(Ticket::ChannelId))
                    .col(string(Ticket::UserId))
                    .col(string(Ticket::Status).default("open"))
                    .col(timestamp_with_time_zone(Ticket::CreatedAt))
                    .col(timestamp_with_time_zone_null(Ticket::ClosedAt))
                    .col(json_binary(Ticket::Data).default("{}"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    #[sea_orm(iden = "tickets")]
    Table,
    Id,
    GuildId,
    ChannelId,
    UserId,
    Status,
    CreatedAt,
    ClosedAt,
    Data,
}
