//! Business logic between the bot/HTTP layers and the data layer.

pub mod auth;
pub mod guild_config;
pub mod ticket;
pub mod transcript;
