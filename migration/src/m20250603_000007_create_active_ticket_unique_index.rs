use sea_orm_migration::prelude::*;

/// At most one open or pending ticket per user and guild.
///
/// Partial indexes are not expressible through `Index::create`, so the statement is raw SQL.
/// Postgres and SQLite accept the same syntax.
const IDX_TICKET_ACTIVE_PER_USER: &str = "idx_tickets_active_per_user";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON tickets (guild_id, user_id) \
                 WHERE status IN ('open', 'pending')",
                IDX_TICKET_ACTIVE_PER_USER
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DROP INDEX IF EXISTS {}",
                IDX_TICKET_ACTIVE_PER_USER
            ))
            .await?;

        Ok(())
    }
}
