/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::storage::AuthStorage;
use crate::utils::config::{get_env_flag, get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Main configuration for the Directus client
pub struct Config {
    /// Base URL of the Directus instance, without trailing slash
    pub base_url: String,
    /// Backend holding the session credentials
    pub auth_storage: AuthStorage,
    /// Remove transport metadata from returned envelopes
    pub strip_headers: bool,
    /// Static API token used when no session is stored
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Total request timeout in seconds
    pub timeout: u64,
    /// Connect timeout in seconds
    pub connect_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// Loads `.env` first, then reads `DIRECTUS_BASE_URL`,
    /// `DIRECTUS_AUTH_STORAGE`, `DIRECTUS_STRIP_HEADERS`, `DIRECTUS_TOKEN`,
    /// `DIRECTUS_TIMEOUT` and `DIRECTUS_CONNECT_TIMEOUT`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let base_url = get_env_or_default("DIRECTUS_BASE_URL", String::from(DEFAULT_BASE_URL));
        if base_url == DEFAULT_BASE_URL {
            debug!("DIRECTUS_BASE_URL not set, using {}", DEFAULT_BASE_URL);
        }

        let auth_storage = match get_env_or_none::<String>("DIRECTUS_AUTH_STORAGE") {
            Some(raw) => raw.parse::<AuthStorage>().unwrap_or_else(|e| {
                error!("{e}, falling back to session storage");
                AuthStorage::Session
            }),
            None => AuthStorage::Session,
        };

        Config {
            base_url: Self::normalize_base_url(&base_url),
            auth_storage,
            strip_headers: get_env_flag("DIRECTUS_STRIP_HEADERS", false),
            token: get_env_or_none::<String>("DIRECTUS_TOKEN").filter(|t| !t.is_empty()),
            timeout: get_env_or_default("DIRECTUS_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            connect_timeout: get_env_or_default(
                "DIRECTUS_CONNECT_TIMEOUT",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }

    /// Creates a configuration for `base_url` with default settings,
    /// ignoring the environment
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Config {
            base_url: Self::normalize_base_url(base_url.as_ref()),
            auth_storage: AuthStorage::Session,
            strip_headers: false,
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Sets the credential storage backend
    #[must_use]
    pub fn auth_storage(mut self, auth_storage: AuthStorage) -> Self {
        self.auth_storage = auth_storage;
        self
    }

    /// Sets whether transport metadata is stripped from envelopes
    #[must_use]
    pub fn strip_headers(mut self, strip_headers: bool) -> Self {
        self.strip_headers = strip_headers;
        self
    }

    /// Sets the static API token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the total request and connect timeouts, in seconds
    #[must_use]
    pub fn timeouts(mut self, timeout: u64, connect_timeout: u64) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }

    /// Removes every trailing `/` from `base_url`
    #[must_use]
    pub fn normalize_base_url(base_url: &str) -> String {
        base_url.trim().trim_end_matches('/').to_string()
    }
}
