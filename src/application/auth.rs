/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Token management for the Directus API
//!
//! Decides which bearer token accompanies each request:
//! - The stored session access token, refreshed first when it is within
//!   the safety margin of its expiry
//! - Otherwise the static API token, if one is configured
//! - Otherwise none

use crate::constants::TOKEN_EXPIRY_MARGIN_SECS;
use crate::model::auth::{AuthData, SessionRecord};
use crate::model::envelope::Envelope;
use crate::model::http::{HttpMethod, Transport};
use crate::storage::CredentialStore;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Path of the token refresh endpoint
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Authentication state of a client
///
/// Owns the credential store and the optional static token. Every outbound
/// request asks [`Auth::get_access_token`] for its bearer token.
pub struct Auth {
    store: Arc<dyn CredentialStore>,
    static_token: RwLock<Option<String>>,
}

impl Auth {
    /// Creates a new Auth instance
    ///
    /// # Arguments
    /// * `store` - Credential store holding the session record
    /// * `static_token` - Token used when no session is stored
    pub fn new(store: Arc<dyn CredentialStore>, static_token: Option<String>) -> Self {
        Self {
            store,
            static_token: RwLock::new(static_token),
        }
    }

    /// Credential store in use
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Replaces the static API token
    pub fn set_static_token(&self, token: Option<String>) {
        *self.static_token.write() = token;
    }

    /// Current static API token
    #[must_use]
    pub fn static_token(&self) -> Option<String> {
        self.static_token.read().clone()
    }

    /// Session record currently held by the store
    #[must_use]
    pub fn session(&self) -> Option<SessionRecord> {
        SessionRecord::load(self.store.as_ref())
    }

    /// Persists a token payload received just now as the session record
    pub fn save_session(&self, data: &AuthData) -> SessionRecord {
        let record = SessionRecord::from_auth_data(data, Utc::now());
        record.save(self.store.as_ref());
        debug!("Session stored, access token expires at {}", record.expires_at);
        record
    }

    /// Removes the session record from the store
    pub fn clear_session(&self) {
        SessionRecord::clear(self.store.as_ref());
        debug!("Session cleared");
    }

    /// Returns the bearer token for the next request
    ///
    /// With a stored session, an access token expiring within
    /// [`TOKEN_EXPIRY_MARGIN_SECS`] is refreshed first; a failed refresh
    /// clears the session and yields `None`. Without a session the static
    /// token is returned, if any.
    pub async fn get_access_token(&self, transport: &Transport) -> Option<String> {
        if let Some(session) = self.session() {
            if session.is_expired(TOKEN_EXPIRY_MARGIN_SECS) {
                debug!(
                    "Access token expires in {}s, refreshing",
                    session.seconds_until_expiry()
                );
                return self.refresh(transport, &session.refresh_token).await;
            }
            return Some(session.access_token);
        }

        self.static_token()
    }

    /// Exchanges `refresh_token` for a new token pair
    ///
    /// On any failure the session is dropped locally. The server already
    /// rejected the refresh token, so no logout call is made.
    async fn refresh(&self, transport: &Transport, refresh_token: &str) -> Option<String> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let response = transport
            .send(HttpMethod::Post, REFRESH_PATH, Some(&body), None)
            .await;

        if !response.is_ok() {
            warn!(
                "Token refresh failed with status {:?}, clearing session",
                response.http_code()
            );
            self.clear_session();
            return None;
        }

        match parse_auth_data(&response) {
            Some(data) => {
                self.save_session(&data);
                info!("✓ Token refreshed successfully");
                Some(data.access_token)
            }
            None => {
                error!("Token refresh response has no usable token data, clearing session");
                self.clear_session();
                None
            }
        }
    }
}

/// Extracts the token payload from a login or refresh envelope
pub(crate) fn parse_auth_data(envelope: &Envelope) -> Option<AuthData> {
    let data = envelope.data.clone()?;
    match serde_json::from_value::<AuthData>(data) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("Unexpected token payload: {}", e);
            None
        }
    }
}
