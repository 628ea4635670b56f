use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};

use crate::{bot::handler::Handler, config::Config, error::AppError};

/// Builds the Discord client without connecting.
///
/// Message content is needed to capture ticket history for transcripts; it is a privileged
/// intent and must be enabled in the Discord Developer Portal.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The client and its REST handle for use outside the bot
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(
    config: Arc<Config>,
    db: DatabaseConnection,
) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(db, config.clone()))
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the gateway connection until it shuts down.
///
/// Call from within a spawned task; this only returns on disconnect or error.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
