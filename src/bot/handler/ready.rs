//! Ready event handler.
//!
//! Fired once per gateway connection after the handshake. Slash commands are registered
//! globally here so every guild the bot joins gets them.

use serenity::all::{Command, Context, Ready};

use crate::bot::command;

pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    match Command::set_global_commands(&ctx.http, command::commands()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
