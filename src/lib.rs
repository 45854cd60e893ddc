/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Directus SDK
//!
//! A session-aware client for the Directus REST API.
//!
//! The client wraps the item CRUD endpoints and the email/password
//! authentication flow behind plain method calls. Credentials obtained at
//! login are kept in a pluggable [`storage::CredentialStore`] and the access
//! token is refreshed transparently before every request once it gets close
//! to expiry.
//!
//! ## Example
//!
//! ```ignore
//! use directus_sdk::prelude::*;
//!
//! let config = Config::with_base_url("https://cms.example.com/");
//! let client = Client::new(config)?;
//!
//! if client.auth_user("admin@example.com", "secret", None).await.is_success() {
//!     let posts = client.get_items("posts", ItemQuery::All).await;
//!     println!("{}", posts);
//! }
//! ```

/// Application layer: configuration, token management and the client
pub mod application;
/// Constants shared across the crate
pub mod constants;
/// Error type for the library
pub mod error;
/// Request, response and transport models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Credential store backends
pub mod storage;
/// Environment and logging helpers
pub mod utils;

/// Re-export of the configuration module
pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
