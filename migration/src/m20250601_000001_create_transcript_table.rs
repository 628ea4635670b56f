use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transcript::Table)
                    .if_not_exists()
                    .col(string(Transcript::Id).primary_key())
                    .col(text(Transcript::Html))
                    .col(json_binary(Transcript::TicketInfo))
                    .col(big_integer(Transcript::CreatedAt))
                    .col(big_integer(Transcript::AccessedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transcript::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transcript {
    #[sea_orm(iden = "transcripts")]
    Table,
    Id,
    Html,
    TicketInfo,
    CreatedAt,
    AccessedAt,
}
