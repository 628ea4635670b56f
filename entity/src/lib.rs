//! SeaORM entity definitions for the ticket bot's persisted records.

pub mod prelude;

pub mod command_settings;
pub mod moderation_settings;
pub mod sea_orm_active_enums;
pub mod server_settings;
pub mod ticket;
pub mod transcript;
