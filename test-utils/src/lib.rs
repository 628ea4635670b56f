//! Test support for the ticket bot workspace.
//!
//! - `builder::TestBuilder` creates an in-memory SQLite database with selected tables
//! - `context::TestContext` holds that database and an optional session
//! - `factory` inserts tickets, transcripts and settings rows with defaults
//!
//! ```rust,ignore
//! let test = TestBuilder::new().with_all_tables().build().await?;
//! let db = test.db.as_ref().unwrap();
//! let ticket = factory::create_ticket(db).await?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
