/// Token management
pub mod auth;
/// Directus client and its service implementations
pub mod client;
/// Application configuration module
pub mod config;
/// Service interfaces
pub mod interfaces;
