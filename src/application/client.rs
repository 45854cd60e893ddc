/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client for the Directus API
//!
//! The client handles:
//! - Storage of the session credentials in the configured backend
//! - Transparent access token refresh before each request
//! - Item CRUD and the email/password authentication flow
//!
//! # Example
//! ```ignore
//! use directus_sdk::prelude::*;
//!
//! let client = Client::new(Config::new())?;
//! client.auth_user("admin@example.com", "secret", None).await;
//! let post = client.get_items("posts", ItemQuery::from(7)).await;
//! ```

use crate::application::auth::{Auth, parse_auth_data};
use crate::application::config::Config;
use crate::application::interfaces::{AuthService, ItemService};
use crate::constants::REFRESH_TOKEN_KEY;
use crate::error::AppError;
use crate::model::envelope::{AuthOutcome, Envelope};
use crate::model::http::{HttpMethod, Transport};
use crate::model::items::{ItemId, ItemKeys, ItemQuery, items_path};
use crate::storage::{AuthStorage, CookieStore, CredentialStore, SessionStore};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const PASSWORD_REQUEST_PATH: &str = "/auth/password/request";
const PASSWORD_RESET_PATH: &str = "/auth/password/reset";

/// Session-aware Directus client
pub struct Client {
    config: Arc<Config>,
    transport: Transport,
    auth: Auth,
}

impl Client {
    /// Creates a client with a fresh store of the configured backend
    ///
    /// # Returns
    /// * `Ok(Client)` - Client ready to use
    /// * `Err(AppError)` - If the configuration is invalid or the HTTP
    ///   client cannot be built
    pub fn new(config: Config) -> Result<Self, AppError> {
        let store: Arc<dyn CredentialStore> = match config.auth_storage {
            AuthStorage::Session => Arc::new(SessionStore::new()),
            AuthStorage::Cookie => Arc::new(CookieStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Creates a client over an existing credential store
    ///
    /// This is the constructor to use when the store is tied to a request
    /// context, e.g. a [`CookieStore`] built from the incoming `Cookie`
    /// header.
    pub fn with_store(mut config: Config, store: Arc<dyn CredentialStore>) -> Result<Self, AppError> {
        config.base_url = Config::normalize_base_url(&config.base_url);
        if config.base_url.is_empty() {
            error!("Directus base URL is empty");
            return Err(AppError::InvalidInput("base_url must not be empty".to_string()));
        }
        if store.backend() != config.auth_storage {
            warn!(
                "Configured auth storage is {} but the provided store is {}",
                config.auth_storage,
                store.backend()
            );
        }

        let transport = Transport::new(&config)?;
        let auth = Auth::new(store, config.token.clone());
        debug!("Directus client created for {}", config.base_url);

        Ok(Self {
            config: Arc::new(config),
            transport,
            auth,
        })
    }

    /// Configuration of this client
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token manager of this client
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Sets the static API token used when no session is stored
    pub fn auth_token(&self, token: impl Into<String>) {
        self.auth.set_static_token(Some(token.into()));
    }

    /// Reads a value from the credential store
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<String> {
        self.auth.store().get(key)
    }

    /// Whether a session refresh token is stored
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.session().is_some()
    }

    /// Bearer token the next request would carry, refreshing it if needed
    pub async fn get_access_token(&self) -> Option<String> {
        self.auth.get_access_token(&self.transport).await
    }

    /// Issues one call to the API
    ///
    /// The payload goes to the query string for GET and to a JSON body
    /// otherwise. The status code is not interpreted.
    ///
    /// # Arguments
    /// * `path` - API path starting with `/`
    /// * `data` - Optional payload
    /// * `method` - Verb
    pub async fn make_call(&self, path: &str, data: Option<&Value>, method: HttpMethod) -> Envelope {
        let token = self.get_access_token().await;
        self.transport
            .send(method, path, data, token.as_deref())
            .await
    }

    /// Drops the transport metadata when the configuration asks for it
    fn strip_headers(&self, envelope: Envelope) -> Envelope {
        if self.config.strip_headers {
            envelope.without_headers()
        } else {
            envelope
        }
    }

    /// Failure carrying the envelope stripped per configuration
    fn failure(&self, envelope: Envelope) -> AuthOutcome {
        AuthOutcome::Failure(self.strip_headers(envelope))
    }
}

#[async_trait]
impl ItemService for Client {
    async fn get_items(&self, collection: &str, query: ItemQuery) -> Envelope {
        let response = match query {
            ItemQuery::All => {
                self.make_call(&items_path(collection, None), None, HttpMethod::Get)
                    .await
            }
            ItemQuery::Id(id) => {
                self.make_call(&items_path(collection, Some(&id)), None, HttpMethod::Get)
                    .await
            }
            ItemQuery::Filter(filter) => {
                self.make_call(&items_path(collection, None), Some(&filter), HttpMethod::Get)
                    .await
            }
        };
        self.strip_headers(response)
    }

    async fn create_items(&self, collection: &str, fields: Value) -> Envelope {
        let response = self
            .make_call(&items_path(collection, None), Some(&fields), HttpMethod::Post)
            .await;
        self.strip_headers(response)
    }

    async fn update_items(&self, collection: &str, fields: Value, id: Option<ItemId>) -> Envelope {
        let path = items_path(collection, id.as_ref());
        let response = self.make_call(&path, Some(&fields), HttpMethod::Patch).await;
        self.strip_headers(response)
    }

    async fn delete_items(&self, collection: &str, keys: ItemKeys) -> Envelope {
        let response = match keys {
            ItemKeys::Many(ids) => {
                let body = json!(ids);
                self.make_call(&items_path(collection, None), Some(&body), HttpMethod::Delete)
                    .await
            }
            ItemKeys::One(id) => {
                self.make_call(&items_path(collection, Some(&id)), None, HttpMethod::Delete)
                    .await
            }
        };
        self.strip_headers(response)
    }
}

#[async_trait]
impl AuthService for Client {
    async fn auth_user(&self, email: &str, password: &str, otp: Option<&str>) -> AuthOutcome {
        let mut body = json!({
            "email": email,
            "password": password,
        });
        if let Some(otp) = otp {
            body["otp"] = json!(otp);
        }

        debug!("Sending login request for {}", email);
        let response = self.make_call(LOGIN_PATH, Some(&body), HttpMethod::Post).await;

        if !response.is_ok() {
            warn!("Login failed with status {:?}", response.http_code());
            return AuthOutcome::Failure(response);
        }

        match parse_auth_data(&response) {
            Some(data) => {
                self.auth.save_session(&data);
                info!("✓ Login successful");
                AuthOutcome::Success
            }
            None => {
                error!("Login response has no usable token data");
                AuthOutcome::Failure(response)
            }
        }
    }

    async fn auth_logout(&self) -> AuthOutcome {
        // may rotate the refresh token, so it runs before the token is read
        let token = self.get_access_token().await;
        let body = json!({ "refresh_token": self.get_value(REFRESH_TOKEN_KEY) });

        let response = self
            .transport
            .send(HttpMethod::Post, LOGOUT_PATH, Some(&body), token.as_deref())
            .await;

        if response.is_ok() {
            self.auth.clear_session();
            info!("✓ Logged out successfully");
            AuthOutcome::Success
        } else {
            warn!("Logout failed with status {:?}", response.http_code());
            AuthOutcome::Failure(response)
        }
    }

    async fn auth_password_request(&self, email: &str, reset_url: Option<&str>) -> AuthOutcome {
        let mut body = json!({ "email": email });
        if let Some(reset_url) = reset_url {
            body["reset_url"] = json!(reset_url);
        }

        let response = self
            .make_call(PASSWORD_REQUEST_PATH, Some(&body), HttpMethod::Post)
            .await;

        if response.is_ok() {
            info!("Password reset requested for {}", email);
            AuthOutcome::Success
        } else {
            warn!("Password reset request failed with status {:?}", response.http_code());
            self.failure(response)
        }
    }

    async fn auth_password_reset(&self, token: &str, password: &str) -> AuthOutcome {
        let body = json!({
            "token": token,
            "password": password,
        });

        let response = self
            .make_call(PASSWORD_RESET_PATH, Some(&body), HttpMethod::Post)
            .await;

        if response.is_ok() {
            info!("Password reset completed");
            AuthOutcome::Success
        } else {
            warn!("Password reset failed with status {:?}", response.http_code());
            self.failure(response)
        }
    }
}
