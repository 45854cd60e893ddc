/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend used to persist the session credentials between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStorage {
    /// Values live in state owned by the calling context
    #[default]
    Session,
    /// Values are written as cookies to the client
    Cookie,
}

impl fmt::Display for AuthStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStorage::Session => write!(f, "session"),
            AuthStorage::Cookie => write!(f, "cookie"),
        }
    }
}

impl FromStr for AuthStorage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" | "_session" => Ok(AuthStorage::Session),
            "cookie" | "_cookie" => Ok(AuthStorage::Cookie),
            other => Err(AppError::InvalidInput(format!(
                "unknown auth storage backend: {other}"
            ))),
        }
    }
}

/// Named-value store holding the session credentials
///
/// Implementations use interior mutability so a single store can be shared
/// between the client and the code that owns the request context.
pub trait CredentialStore: Send + Sync {
    /// Stores `value` under `key`
    fn set(&self, key: &str, value: &str);

    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Removes the value stored under `key`
    fn unset(&self, key: &str);

    /// Backend kind of this store
    fn backend(&self) -> AuthStorage;
}
