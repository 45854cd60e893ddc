/// Authentication service interface
pub mod auth;
/// Item service interface
pub mod items;

pub use auth::AuthService;
pub use items::ItemService;
