/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::model::envelope::AuthOutcome;
use async_trait::async_trait;

/// Interface for the email/password authentication flow
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Logs in and stores the session record on success
    ///
    /// A failure carries the response envelope as received, `headers`
    /// included.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `password` - User password
    /// * `otp` - One-time password when two-factor auth is enabled
    async fn auth_user(&self, email: &str, password: &str, otp: Option<&str>) -> AuthOutcome;

    /// Invalidates the stored refresh token and clears the session record
    ///
    /// A failure carries the response envelope as received.
    async fn auth_logout(&self) -> AuthOutcome;

    /// Asks the server to email a password reset link
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `reset_url` - Page the link in the email points to
    async fn auth_password_request(&self, email: &str, reset_url: Option<&str>) -> AuthOutcome;

    /// Sets a new password using the token from the reset email
    ///
    /// A failure carries the envelope stripped per configuration.
    async fn auth_password_reset(&self, token: &str, password: &str) -> AuthOutcome;
}
