//! Environment-based application configuration.
//!
//! Only the bot token is mandatory. Everything else falls back to a default or is left unset,
//! in which case the dependent feature (OAuth login, transcript posting, ...) is disabled.

use crate::error::config::ConfigError;

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TICKET_CHANNEL_NAME_TEMPLATE: &str = "ticket-{username}";

/// Discord application credentials used for the OAuth2 login flow.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,

    /// Default channel receiving transcript links when a guild has not configured one.
    pub transcript_channel_id: Option<String>,
    /// Default category new ticket channels are created under.
    pub ticket_category_id: Option<String>,
    /// Roles treated as moderators in every guild, in addition to per-guild settings.
    pub moderator_role_ids: Vec<String>,
    pub ticket_channel_name_template: String,

    pub port: u16,
    /// Externally visible base URL without a trailing slash.
    pub app_url: String,

    pub oauth: Option<OAuthCredentials>,
    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub database_url: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(ConfigError::MissingEnvVar)` - `DISCORD_TOKEN` is unset or empty
    /// - `Err(ConfigError::InvalidValue)` - `PORT` is not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = var("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;

        let port = match var("PORT") {
            Some(value) => match value.trim().parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!("Invalid PORT {:?}, falling back to {}", value, DEFAULT_PORT);
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let app_url = match var("RAILWAY_STATIC_URL") {
            Some(url) => normalize_base_url(&url),
            None => format!("http://localhost:{}", port),
        };

        let oauth = match (var("DISCORD_CLIENT_ID"), var("DISCORD_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(OAuthCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Self {
            discord_token,
            transcript_channel_id: var("TRANSCRIPT_CHANNEL_ID"),
            ticket_category_id: var("TICKET_CATEGORY_ID"),
            moderator_role_ids: parse_id_list(var("MODERATOR_ROLE_IDS").as_deref()),
            ticket_channel_name_template: var("TICKET_CHANNEL_NAME_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_TICKET_CHANNEL_NAME_TEMPLATE.to_string()),
            port,
            app_url,
            oauth,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            database_url: var("DATABASE_URL"),
        })
    }

    /// OAuth2 redirect target registered with Discord.
    pub fn redirect_url(&self) -> String {
        format!("{}/auth/callback", self.app_url)
    }

    /// Public link to a stored transcript.
    pub fn transcript_url(&self, transcript_id: &str) -> String {
        format!("{}/transcripts/{}", self.app_url, transcript_id)
    }
}

/// Splits a comma-separated id list, trimming whitespace and dropping empty entries.
pub fn parse_id_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Railway exposes the static URL as a bare host name.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = config_from(&[("PORT", "8080")]);

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref name)) if name == "DISCORD_TOKEN"
        ));
    }

    #[test]
    fn empty_token_is_treated_as_missing() {
        let result = config_from(&[("DISCORD_TOKEN", "  ")]);

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn applies_defaults_when_only_token_is_set() {
        let config = config_from(&[("DISCORD_TOKEN", "token")]).unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_url, "http://localhost:3000");
        assert_eq!(config.ticket_channel_name_template, "ticket-{username}");
        assert!(config.moderator_role_ids.is_empty());
        assert!(config.transcript_channel_id.is_none());
        assert!(config.ticket_category_id.is_none());
        assert!(config.database_url.is_none());
        assert!(config.oauth.is_none());
    }

    #[test]
    fn empty_moderator_role_ids_yield_empty_list() {
        let config =
            config_from(&[("DISCORD_TOKEN", "token"), ("MODERATOR_ROLE_IDS", "")]).unwrap();

        assert!(config.moderator_role_ids.is_empty());
    }

    #[test]
    fn moderator_role_ids_are_trimmed() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "token"),
            ("MODERATOR_ROLE_IDS", "111, 222 ,333"),
        ])
        .unwrap();

        assert_eq!(config.moderator_role_ids, vec!["111", "222", "333"]);
    }

    #[test]
    fn id_list_drops_empty_entries() {
        assert_eq!(parse_id_list(Some(" , 1,,2 , ")), vec!["1", "2"]);
        assert!(parse_id_list(None).is_empty());
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        let config = config_from(&[("DISCORD_TOKEN", "token"), ("PORT", "eighty")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.app_url, "http://localhost:3000");
    }

    #[test]
    fn port_is_read_when_valid() {
        let config = config_from(&[("DISCORD_TOKEN", "token"), ("PORT", " 8080 ")]).unwrap();

        assert_eq!(config.port, 8080);
    }

    #[test]
    fn static_url_gets_https_scheme() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "token"),
            ("RAILWAY_STATIC_URL", "bot.up.railway.app/"),
        ])
        .unwrap();

        assert_eq!(config.app_url, "https://bot.up.railway.app");
        assert_eq!(
            config.redirect_url(),
            "https://bot.up.railway.app/auth/callback"
        );
        assert_eq!(
            config.transcript_url("abc"),
            "https://bot.up.railway.app/transcripts/abc"
        );
    }

    #[test]
    fn oauth_requires_both_credentials() {
        let partial =
            config_from(&[("DISCORD_TOKEN", "token"), ("DISCORD_CLIENT_ID", "id")]).unwrap();
        assert!(partial.oauth.is_none());

        let full = config_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "id"),
            ("DISCORD_CLIENT_SECRET", "secret"),
        ])
        .unwrap();
        let oauth = full.oauth.unwrap();
        assert_eq!(oauth.client_id, "id");
        assert_eq!(oauth.client_secret, "secret");
    }
}
