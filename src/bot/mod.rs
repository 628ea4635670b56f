//! Discord gateway client, event handlers and slash commands.

pub mod command;
pub mod handler;
pub mod start;
