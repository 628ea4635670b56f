mod bot;
mod config;
mod controller;
mod data;
mod error;
mod middleware;
mod model;
mod router;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, state::AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(
                "{}. Set it in the environment or in a .env file before starting the bot.",
                e
            );
            std::process::exit(1);
        }
    };

    let Some(db) = startup::initialize_database(config.database_url.as_deref()).await else {
        tracing::error!("Database initialization failed, shutting down");
        std::process::exit(1);
    };

    if let Err(e) = serve(config, db).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Runs the bot and the HTTP server until a shutdown signal arrives.
async fn serve(config: Arc<Config>, db: DatabaseConnection) -> Result<(), AppError> {
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let (bot_client, discord_http) = bot::start::init_bot(config.clone(), db.clone()).await?;
    let shard_manager = bot_client.shard_manager.clone();

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router()
        .with_state(AppState::new(
            db.clone(),
            config.clone(),
            http_client,
            oauth_client,
            discord_http,
        ))
        .layer(session)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|e| {
            AppError::InternalError(format!("Failed to bind port {}: {}", config.port, e))
        })?;

    tracing::info!("Listening on 0.0.0.0:{} ({})", config.port, config.app_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("HTTP server error: {}", e)))?;

    shard_manager.shutdown_all().await;
    startup::close_database(db).await;

    tracing::info!("Shut down cleanly");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
