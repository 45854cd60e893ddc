/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Directus SDK Prelude
//!
//! Brings the types needed for most interactions with a Directus instance
//! into scope.
//!
//! ## Usage
//!
//! ```rust
//! use directus_sdk::prelude::*;
//!
//! let config = Config::with_base_url("http://localhost:8055");
//! let client = Client::new(config).expect("valid configuration");
//! assert!(!client.is_authenticated());
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the Directus client
pub use crate::config::Config;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

/// Directus client
pub use crate::application::client::Client;

/// Token manager
pub use crate::application::auth::Auth;

/// Service traits implemented by the client
pub use crate::application::interfaces::{AuthService, ItemService};

// ============================================================================
// MODELS
// ============================================================================

/// Response envelope and related types
pub use crate::model::envelope::{AuthOutcome, Envelope, TransportErrorCode, TransportInfo};

/// Verbs accepted by the request executor
pub use crate::model::http::HttpMethod;

/// Item keys and selections
pub use crate::model::items::{ItemId, ItemKeys, ItemQuery};

/// Stored session record and token payload
pub use crate::model::auth::{AuthData, SessionRecord};

// ============================================================================
// CREDENTIAL STORAGE
// ============================================================================

/// Credential store trait and backends
pub use crate::storage::{AuthStorage, CookieStore, CredentialStore, SessionStore};

/// Store keys of the session record
pub use crate::constants::{ACCESS_EXPIRES_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logger setup
pub use crate::utils::logger::setup_logger;
