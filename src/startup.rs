//! Initialization of the database, sessions and outbound clients.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbBackend, DbErr};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Connects to the database and applies pending migrations.
///
/// This is a single attempt without retries. Failures are logged and reported as `None`
/// rather than propagated, leaving the decision to abort to the caller.
///
/// # Arguments
/// - `database_url` - Connection string, `None` when `DATABASE_URL` is unset
///
/// # Returns
/// - `Some(DatabaseConnection)` - Connected pool with the schema up to date
/// - `None` - No URL configured, the database was unreachable or a migration failed
pub async fn initialize_database(database_url: Option<&str>) -> Option<DatabaseConnection> {
    let Some(database_url) = database_url else {
        tracing::error!("DATABASE_URL is not set, cannot initialize the database");
        return None;
    };

    let db = match connect(database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to the database: {}", e);
            return None;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        tracing::error!("Failed to run database migrations: {}", e);
        close_database(db).await;
        return None;
    }

    tracing::info!("Database initialized");

    Some(db)
}

async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(require_tls(database_url));
    opt.connect_timeout(CONNECT_TIMEOUT)
        .acquire_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.ping().await?;

    Ok(db)
}

/// Requires TLS on Postgres connections that do not choose an `sslmode` themselves.
///
/// `sslmode=require` encrypts the connection without verifying the server certificate, which
/// managed hosts with self-signed chains need.
fn require_tls(database_url: &str) -> String {
    let is_postgres =
        database_url.starts_with("postgres://") || database_url.starts_with("postgresql://");
    if !is_postgres || database_url.contains("sslmode=") {
        return database_url.to_string();
    }

    let separator = if database_url.contains('?') { '&' } else { '?' };
    format!("{}{}sslmode=require", database_url, separator)
}

/// Closes the connection pool during shutdown.
pub async fn close_database(db: DatabaseConnection) {
    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }
}

/// Creates the session layer backed by the application's Postgres database.
///
/// The session table is created on first start. Sessions expire after seven days without
/// activity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    if db.get_database_backend() != DbBackend::Postgres {
        return Err(AppError::InternalError(
            "Sessions require a Postgres database".to_string(),
        ));
    }
    let pool = db.get_postgres_connection_pool().clone();

    let session_store = PostgresStore::new(pool);
    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to migrate session store: {}", e)))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            SESSION_INACTIVITY_DAYS,
        )));

    Ok(session_layer)
}

/// HTTP client for Discord API calls.
///
/// Redirects are disabled so OAuth responses cannot bounce requests to other hosts.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client.
///
/// # Returns
/// - `Ok(Some(OAuth2Client))` - Credentials are configured
/// - `Ok(None)` - `DISCORD_CLIENT_ID` or `DISCORD_CLIENT_SECRET` is missing, login is disabled
/// - `Err(AppError::ConfigErr)` - One of the OAuth URLs is not a valid URL
pub fn setup_oauth_client(config: &Config) -> Result<Option<OAuth2Client>, AppError> {
    let Some(credentials) = &config.oauth else {
        tracing::warn!("Discord OAuth credentials not set, transcript login is disabled");
        return Ok(None);
    };

    let invalid = |name: &str, value: &str| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    };

    let auth_url = AuthUrl::new(config.discord_auth_url.clone())
        .map_err(|_| invalid("discord_auth_url", &config.discord_auth_url))?;
    let token_url = TokenUrl::new(config.discord_token_url.clone())
        .map_err(|_| invalid("discord_token_url", &config.discord_token_url))?;
    let redirect_url = config.redirect_url();
    let redirect_url = RedirectUrl::new(redirect_url.clone())
        .map_err(|_| invalid("RAILWAY_STATIC_URL", &redirect_url))?;

    let client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
        .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(Some(client))
}
