/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("directus-sdk/", env!("CARGO_PKG_VERSION"));

/// Store key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "directus_refresh";
/// Store key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "directus_access";
/// Store key holding the access token expiry (epoch seconds)
pub const ACCESS_EXPIRES_KEY: &str = "directus_access_expires";

/// Seconds before expiry at which an access token is already refreshed
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 50;

/// Lifetime of the cookies written by the cookie backend (7 days)
pub const COOKIE_MAX_AGE_SECS: i64 = 604_800;
/// Path attribute of the cookies written by the cookie backend
pub const COOKIE_PATH: &str = "/";

/// Default base URL of a local Directus instance
pub const DEFAULT_BASE_URL: &str = "http://localhost:8055";
/// Default total request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
