//! Remote authentication operations consumed by the session manager.

use async_trait::async_trait;

use crate::remote::RemoteResult;

use super::session::Identity;

/// The authentication surface of the remote service.
///
/// The session manager depends on this contract, not on the HTTP binding,
/// so tests can drive it with a hand-rolled fake. The REST implementation
/// lives in the interaction crate.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a raw access token.
    async fn authenticate(&self, subject: &str, secret: &str) -> RemoteResult<String>;

    /// Creates a new account. The response body is opaque and ignored;
    /// the service issues no token here.
    async fn register(
        &self,
        display_name: &str,
        subject: &str,
        secret: &str,
    ) -> RemoteResult<()>;

    /// Fetches the identity behind the currently stored token.
    async fn fetch_current_identity(&self) -> RemoteResult<Identity>;

    /// Asks the service to send a password-reset e-mail.
    async fn request_password_reset(&self, subject: &str) -> RemoteResult<()>;

    /// Completes a password reset with the e-mailed reset token.
    async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_secret: &str,
    ) -> RemoteResult<()>;
}
