/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{ACCESS_EXPIRES_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::storage::CredentialStore;
use chrono::{DateTime, Utc};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest stored expiry accepted, in seconds either side of the epoch
const MAX_EXPIRY_SECS: f64 = 1e15;

/// Token payload returned by `/auth/login` and `/auth/refresh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Short-lived bearer token
    pub access_token: String,
    /// Token exchanged for a new access token
    pub refresh_token: String,
    /// Lifetime of the access token in milliseconds
    pub expires: i64,
}

/// The three credential values kept in the store between calls
#[derive(Debug, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Refresh token
    #[serde(skip_serializing)]
    pub refresh_token: String,
    /// Access token
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Access token expiry (seconds since epoch)
    pub expires_at: i64,
}

impl SessionRecord {
    /// Builds a record from a token payload received at `now`
    ///
    /// The relative lifetime in milliseconds becomes an absolute expiry in
    /// whole seconds.
    #[must_use]
    pub fn from_auth_data(data: &AuthData, now: DateTime<Utc>) -> Self {
        Self {
            refresh_token: data.refresh_token.clone(),
            access_token: data.access_token.clone(),
            expires_at: now.timestamp().saturating_add(data.expires / 1000),
        }
    }

    /// Checks whether the access token expires within `margin_seconds`
    #[must_use]
    pub fn is_expired(&self, margin_seconds: i64) -> bool {
        self.expires_at <= Utc::now().timestamp() + margin_seconds
    }

    /// Seconds left before expiry, negative once expired
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        self.expires_at.saturating_sub(Utc::now().timestamp())
    }

    /// Loads the record from `store`
    ///
    /// Returns `None` when no (non-empty) refresh token is stored. A missing,
    /// unparseable or out of range expiry loads as `0`, i.e. already expired.
    pub fn load(store: &dyn CredentialStore) -> Option<Self> {
        let refresh_token = store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())?;
        let access_token = store.get(ACCESS_TOKEN_KEY).unwrap_or_default();
        let expires_at = store
            .get(ACCESS_EXPIRES_KEY)
            .map(|raw| parse_expiry(&raw))
            .unwrap_or(0);

        Some(Self {
            refresh_token,
            access_token,
            expires_at,
        })
    }

    /// Writes the three values to `store`
    pub fn save(&self, store: &dyn CredentialStore) {
        store.set(REFRESH_TOKEN_KEY, &self.refresh_token);
        store.set(ACCESS_TOKEN_KEY, &self.access_token);
        store.set(ACCESS_EXPIRES_KEY, &self.expires_at.to_string());
    }

    /// Removes the three values from `store`
    pub fn clear(store: &dyn CredentialStore) {
        store.unset(REFRESH_TOKEN_KEY);
        store.unset(ACCESS_TOKEN_KEY);
        store.unset(ACCESS_EXPIRES_KEY);
    }
}

/// Parses a stored expiry; non-finite or out of range values count as `0`
fn parse_expiry(raw: &str) -> i64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= MAX_EXPIRY_SECS => v as i64,
        Ok(v) => {
            warn!("Stored access token expiry is out of range: {}", v);
            0
        }
        Err(_) => {
            warn!("Stored access token expiry is not a timestamp: {}", raw);
            0
        }
    }
}
