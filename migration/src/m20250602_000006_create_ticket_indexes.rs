use sea_orm_migration::prelude::*;

use crate::m20250601_000005_create_ticket_table::Ticket;

const IDX_TICKET_GUILD_USER_STATUS: &str = "idx_tickets_guild_user_status";
const IDX_TICKET_CHANNEL: &str = "idx_tickets_channel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(IDX_TICKET_GUILD_USER_STATUS)
                    .table(Ticket::Table)
                    .col(Ticket::GuildId)
                    .col(Ticket::UserId)
                    .col(Ticket::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TICKET_CHANNEL)
                    .table(Ticket::Table)
                    .col(Ticket::ChannelId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TICKET_CHANNEL)
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TICKET_GUILD_USER_STATUS)
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
