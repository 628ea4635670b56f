pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_transcript_table;
mod m20250601_000002_create_server_settings_table;
mod m20250601_000003_create_moderation_settings_table;
mod m20250601_000004_create_command_settings_table;
mod m20250601_000005_create_ticket_table;
mod m20250602_000006_create_ticket_indexes;
mod m20250603_000007_create_active_ticket_unique_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_transcript_table::Migration),
            Box::new(m20250601_000002_create_server_settings_table::Migration),
            Box::new(m20250601_000003_create_moderation_settings_table::Migration),
            Box::new(m20250601_000004_create_command_settings_table::Migration),
            Box::new(m20250601_000005_create_ticket_table::Migration),
            Box::new(m20250602_000006_create_ticket_indexes::Migration),
            Box::new(m20250603_000007_create_active_ticket_unique_index::Migration),
        ]
    }
}
