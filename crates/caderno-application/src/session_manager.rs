//! The single authority over "who is logged in".
//!
//! The session manager owns the persisted token and the process-local
//! session derived from it. Everything session-related flows through here:
//! startup restore, login, registration, logout, password resets. Other
//! components read the session through [`SessionManager::session`] and
//! never touch the token slot themselves.

use std::sync::Arc;

use caderno_core::auth::{
    AuthGateway, Claims, Identity, Session, TokenStore, decode_claims,
};
use caderno_core::remote::RemoteError;
use tokio::sync::RwLock;

/// Fallback messages when the service reports no detail.
const LOGIN_FALLBACK: &str = "failed to sign in";
const REGISTER_FALLBACK: &str = "failed to create account";
const RESET_REQUEST_FALLBACK: &str = "failed to send the reset e-mail";
const RESET_CONFIRM_FALLBACK: &str = "failed to reset the password";

/// Outcome of a credential operation, shaped for the auth forms.
///
/// Failures are values, never panics: the form shows `message` and stays
/// where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    fn from_remote(err: &RemoteError, fallback: &str) -> Self {
        Self::failure(err.message_or(fallback))
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Owns the credential token and the session derived from it.
///
/// One instance is created at startup and handed to the UI layer by
/// reference; there is no ambient global. [`SessionManager::initialize`]
/// and [`SessionManager::teardown`] bound its lifecycle.
pub struct SessionManager {
    token_store: Arc<dyn TokenStore>,
    gateway: Arc<dyn AuthGateway>,
    session: RwLock<Session>,
}

impl SessionManager {
    /// Creates a manager in the unresolved state. Call
    /// [`SessionManager::initialize`] before reading the session.
    pub fn new(token_store: Arc<dyn TokenStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            token_store,
            gateway,
            session: RwLock::new(Session::unresolved()),
        }
    }

    /// Current session snapshot.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Restores the session from the persisted token, once, at startup.
    ///
    /// Always ends with a resolved session: a missing, unreadable,
    /// undecodable, or expired token resolves to "not signed in" (erasing
    /// the slot where it held an invalid token) instead of failing. Callers
    /// never observe `Loading` after this returns.
    pub async fn initialize(&self) -> Session {
        let identity = self.restore_identity().await;
        let session = Session::resolved(identity);
        *self.session.write().await = session.clone();
        tracing::info!(
            authenticated = session.is_authenticated(),
            "session initialized"
        );
        session
    }

    /// Signs in with the given credentials.
    ///
    /// On success the token is persisted and the identity set; on failure
    /// nothing is persisted and the session stays as it was.
    pub async fn login(&self, subject: &str, secret: &str) -> AuthOutcome {
        let token = match self.gateway.authenticate(subject, secret).await {
            Ok(token) => token,
            Err(err) => {
                tracing::debug!("authentication rejected: {err}");
                return AuthOutcome::from_remote(&err, LOGIN_FALLBACK);
            }
        };

        if let Err(err) = self.token_store.save(&token).await {
            tracing::warn!("failed to persist the token: {err}");
            return AuthOutcome::failure(LOGIN_FALLBACK);
        }

        // Prefer the server's view of the account; fall back to the claims.
        let identity = match self.gateway.fetch_current_identity().await {
            Ok(identity) => identity,
            Err(fetch_err) => match decode_claims(&token) {
                Ok(claims) => Identity::from_claims(&claims),
                Err(decode_err) => {
                    // Neither source can say who this is; undo the
                    // persistence so no invalid token outlives the attempt.
                    tracing::warn!(
                        "issued token is undecodable ({decode_err}) and the \
                         identity fetch failed ({fetch_err})"
                    );
                    self.erase_token().await;
                    return AuthOutcome::failure(LOGIN_FALLBACK);
                }
            },
        };

        self.set_identity(Some(identity)).await;
        AuthOutcome::Success
    }

    /// Creates an account, then signs in with the same credentials.
    ///
    /// The service issues no token on registration, hence the implicit
    /// login; the combined outcome is the login's outcome.
    pub async fn register(
        &self,
        display_name: &str,
        subject: &str,
        secret: &str,
    ) -> AuthOutcome {
        if let Err(err) = self
            .gateway
            .register(display_name, subject, secret)
            .await
        {
            tracing::debug!("registration rejected: {err}");
            return AuthOutcome::from_remote(&err, REGISTER_FALLBACK);
        }

        self.login(subject, secret).await
    }

    /// Signs out: erases the persisted token and clears the identity.
    ///
    /// Purely local; no remote call is needed to complete a logout.
    pub async fn logout(&self) {
        self.erase_token().await;
        self.set_identity(None).await;
        tracing::info!("session cleared");
    }

    /// Asks the service to send a password-reset e-mail.
    pub async fn request_password_reset(&self, subject: &str) -> AuthOutcome {
        match self.gateway.request_password_reset(subject).await {
            Ok(()) => AuthOutcome::Success,
            Err(err) => AuthOutcome::from_remote(&err, RESET_REQUEST_FALLBACK),
        }
    }

    /// Completes a password reset with the e-mailed reset token.
    pub async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_secret: &str,
    ) -> AuthOutcome {
        match self
            .gateway
            .confirm_password_reset(reset_token, new_secret)
            .await
        {
            Ok(()) => AuthOutcome::Success,
            Err(err) => AuthOutcome::from_remote(&err, RESET_CONFIRM_FALLBACK),
        }
    }

    /// Drops the process-local session state without touching the slot.
    ///
    /// The persisted token survives for the next start; erasing it is
    /// [`SessionManager::logout`]'s job.
    pub async fn teardown(&self) {
        *self.session.write().await = Session::unresolved();
    }

    async fn restore_identity(&self) -> Option<Identity> {
        let token = match self.token_store.load().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("failed to read the token slot: {err}");
                return None;
            }
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!("stored token is undecodable ({err}), discarding");
                self.erase_token().await;
                return None;
            }
        };

        if claims.is_expired() {
            tracing::info!("stored token has expired, discarding");
            self.erase_token().await;
            return None;
        }

        Some(self.resolve_identity(&claims).await)
    }

    /// Server-known identity when reachable, claims-derived otherwise.
    async fn resolve_identity(&self, claims: &Claims) -> Identity {
        match self.gateway.fetch_current_identity().await {
            Ok(identity) => identity,
            Err(err) => {
                tracing::debug!("identity fetch failed ({err}), deriving from claims");
                Identity::from_claims(claims)
            }
        }
    }

    async fn erase_token(&self) {
        if let Err(err) = self.token_store.clear().await {
            tracing::warn!("failed to erase the token slot: {err}");
        }
    }

    async fn set_identity(&self, identity: Option<Identity>) {
        *self.session.write().await = Session::resolved(identity);
    }
}
