use std::env;

use log::*;
use mh_common::Secret;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::ServerError;

const DEFAULT_MH_HOST: &str = "127.0.0.1";
const DEFAULT_MH_PORT: u16 = 5000;
const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// The public base URL of this server, used when building email verification links.
    pub base_url: String,
    /// How long the chat auto-responder waits before answering.
    pub chat_reply_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MH_HOST.to_string(),
            port: DEFAULT_MH_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            base_url: format!("http://{DEFAULT_MH_HOST}:{DEFAULT_MH_PORT}"),
            chat_reply_delay_ms: DEFAULT_CHAT_REPLY_DELAY_MS,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MH_HOST").ok().unwrap_or_else(|| DEFAULT_MH_HOST.into());
        let port = env::var("MH_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for MH_PORT. {e} Using the default, {DEFAULT_MH_PORT}, instead.");
                    DEFAULT_MH_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MH_PORT);
        let database_url = env::var("MH_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MH_DATABASE_URL is not set. Please set it to the URL for the MarketHub database.");
            String::default()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to the \
                 default configuration."
            );
            AuthConfig::default()
        });
        let base_url = env::var("MH_BASE_URL").ok().unwrap_or_else(|| format!("http://{host}:{port}"));
        let chat_reply_delay_ms = env::var("MH_CHAT_REPLY_DELAY_MS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for MH_CHAT_REPLY_DELAY_MS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_CHAT_REPLY_DELAY_MS);
        Self { host, port, database_url, auth, base_url, chat_reply_delay_ms }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The HS256 secret used to sign and verify bearer tokens.
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The JWT signing secret has not been set. I'm using a random value for this session. DO NOT \
             operate on production like this, since every token dies with the process. Set MH_JWT_SECRET instead. \
             🚨️🚨️🚨️"
        );
        let secret: String = thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret =
            env::var("MH_JWT_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [MH_JWT_SECRET]")))?;
        if secret.len() < 16 {
            return Err(ServerError::ConfigurationError(
                "MH_JWT_SECRET must be at least 16 characters long.".to_string(),
            ));
        }
        Ok(Self { jwt_secret: Secret::new(secret) })
    }
}
