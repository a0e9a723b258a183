use std::env;

use thiserror::Error;
use url::Url;

/// Process configuration, read once at startup. Startup aborts when either
/// Supabase credential is missing.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Supabase project URL, e.g. https://abc123.supabase.co
    pub endpoint: Url,
    /// Supabase API key, sent as both `apikey` and bearer token.
    pub service_key: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub debug: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("SUPABASE_URL is not a valid URL: {0}")]
    InvalidEndpoint(#[source] url::ParseError),
    #[error("PORT is not a valid port number: {0:?}")]
    InvalidPort(String),
}

const DEFAULT_PORT: u16 = 5000;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Environment access goes through a lookup closure so tests never mutate
    // process-wide state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = lookup("SUPABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("SUPABASE_URL"))?;
        let endpoint = Url::parse(&endpoint).map_err(ConfigError::InvalidEndpoint)?;

        let service_key = lookup("SUPABASE_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingVar("SUPABASE_KEY"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let debug = lookup("APP_DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "t"))
            .unwrap_or(false)
            || lookup("APP_ENV")
                .map(|v| v.to_lowercase() == "development")
                .unwrap_or(false);

        Ok(Self {
            store: StoreConfig {
                endpoint,
                service_key,
            },
            server: ServerConfig { port, debug },
        })
    }
}
