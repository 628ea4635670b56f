//! Database repository layer for all persisted records.
//!
//! Repositories borrow the explicitly constructed `DatabaseConnection` and convert SeaORM
//! entity models into domain models at this boundary. Settings writes are plain upserts on
//! the guild id: concurrent writers to the same guild are last-writer-wins.

pub mod settings;
pub mod ticket;
pub mod transcript;

#[cfg(test)]
mod test;
