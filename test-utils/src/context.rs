use std::sync::Arc;

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Per-test environment: one in-memory SQLite database and optionally one session stored in it.
///
/// Each context owns its own database, so tests never see each other's rows.
#[derive(Default)]
pub struct TestContext {
    pub db: Option<DatabaseConnection>,
    pub session: Option<Session>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the database connection, opening `sqlite::memory:` on first use.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;
                Ok(self.db.insert(db))
            }
        }
    }

    /// Executes the given `CREATE TABLE` statements in order.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;
        for stmt in &stmts {
            db.execute(stmt).await?;
        }

        Ok(())
    }

    /// Returns a session persisted in the test database.
    ///
    /// The first call creates the session table and a fresh session with the same
    /// seven-day inactivity expiry the server uses.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let pool = self.database().await?.get_sqlite_connection_pool().clone();
                let store = SqliteStore::new(pool);
                store
                    .migrate()
                    .await
                    .map_err(|e| TestError::SessionStore(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(store),
                    Some(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS))),
                );

                Ok(self.session.insert(session))
            }
        }
    }
}
