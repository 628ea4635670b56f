use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, DbBackend, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Collects the tables a test needs and creates them in a fresh in-memory database.
///
/// Tables are generated from the SeaORM entities rather than the migrations, so tests only
/// pay for the tables they touch.
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(Ticket)
///     .with_table(Transcript)
///     .build()
///     .await?;
/// let db = test.db.as_ref().unwrap();
/// ```
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a `CREATE TABLE` for `entity`.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Server, moderation and command settings tables.
    pub fn with_settings_tables(self) -> Self {
        self.with_table(ServerSettings)
            .with_table(ModerationSettings)
            .with_table(CommandSettings)
    }

    /// Every table the bot persists to.
    pub fn with_all_tables(self) -> Self {
        self.with_settings_tables()
            .with_table(Ticket)
            .with_table(Transcript)
    }

    /// Opens the database and creates the queued tables.
    ///
    /// The database is opened even when no table was queued.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;

        Ok(context)
    }
}
