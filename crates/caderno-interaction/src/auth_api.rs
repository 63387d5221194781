//! Authentication endpoints.
//!
//! REST implementation of the [`AuthGateway`] contract over the service's
//! `/auth` resource.

use async_trait::async_trait;
use caderno_core::auth::{AuthGateway, Identity};
use caderno_core::remote::RemoteResult;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    email: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

/// Typed wrapper over the authentication resource.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Creates the binding over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn authenticate(&self, subject: &str, secret: &str) -> RemoteResult<String> {
        let response: LoginResponse = self
            .client
            .post(
                "/auth/login",
                &LoginRequest {
                    email: subject,
                    password: secret,
                },
            )
            .await?;
        Ok(response.access_token)
    }

    async fn register(
        &self,
        display_name: &str,
        subject: &str,
        secret: &str,
    ) -> RemoteResult<()> {
        self.client
            .post_unit(
                "/auth/register",
                &RegisterRequest {
                    name: display_name,
                    email: subject,
                    password: secret,
                },
            )
            .await
    }

    async fn fetch_current_identity(&self) -> RemoteResult<Identity> {
        let user: CurrentUserResponse = self.client.get("/auth/me", &[]).await?;
        Ok(Identity {
            subject: user.email,
            display_name: user.name,
        })
    }

    async fn request_password_reset(&self, subject: &str) -> RemoteResult<()> {
        self.client
            .post_unit("/auth/forgot-password", &ForgotPasswordRequest { email: subject })
            .await
    }

    async fn confirm_password_reset(
        &self,
        reset_token: &str,
        new_secret: &str,
    ) -> RemoteResult<()> {
        self.client
            .post_unit(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token: reset_token,
                    new_password: new_secret,
                },
            )
            .await
    }
}
