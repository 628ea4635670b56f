use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to SQLite or creating a table failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// The session table could not be created.
    #[error("Failed to prepare session store: {0}")]
    SessionStore(String),
}
