use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::config::Config;

pub mod interaction;
pub mod ready;

/// Gateway event handler holding the pool and config needed by slash commands.
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Arc<Config>) -> Self {
        Self { db, config }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Registers the global slash commands once the gateway session is up.
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Dispatches `/ticket` and `/config`; other interaction kinds are ignored.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(self, ctx, interaction).await;
    }
}
