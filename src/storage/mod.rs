/// Cookie-like credential store
pub mod cookie;
/// Session-like credential store
pub mod session;
/// Credential store trait and backend selector
pub mod store;

pub use cookie::{CookieStore, SetCookie};
pub use session::SessionStore;
pub use store::{AuthStorage, CredentialStore};
