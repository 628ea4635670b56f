//! Repositories for the three per-guild settings tables.
//!
//! Every table holds at most one row per guild (the guild id is the primary key). Rows are
//! created lazily by the first write and updated in place afterwards.

pub mod command;
pub mod moderation;
pub mod server;

pub use command::CommandSettingsRepository;
pub use moderation::ModerationSettingsRepository;
pub use server::ServerSettingsRepository;
