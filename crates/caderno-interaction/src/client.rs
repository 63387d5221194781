//! Shared HTTP plumbing for every Caderno API call.

use std::sync::Arc;

use caderno_core::auth::TokenStore;
use caderno_core::remote::{RemoteError, RemoteResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

/// Error payload shape the service uses for non-success responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// One HTTP client shared by all API bindings.
///
/// Attaches the stored access token as a bearer header on every request,
/// and reduces every failure to [`RemoteError`]: connection problems become
/// `Transport`, non-success statuses become `Api` with the `detail` message
/// extracted from the body when the service sent one.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client over the given config and token slot.
    pub fn new(config: ApiConfig, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            client: Client::new(),
            config,
            token_store,
        }
    }

    /// GET `path`, decoding the JSON response body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RemoteResult<T> {
        let builder = self.request(Method::GET, path).await.query(query);
        self.send_json(builder).await
    }

    /// POST `body` to `path`, decoding the JSON response body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<T> {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send_json(builder).await
    }

    /// POST `body` to `path`, ignoring the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<()> {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send_unit(builder).await
    }

    /// PUT `body` to `path`, decoding the JSON response body.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<T> {
        let builder = self.request(Method::PUT, path).await.json(body);
        self.send_json(builder).await
    }

    /// DELETE `path`, ignoring the response body.
    pub async fn delete(&self, path: &str) -> RemoteResult<()> {
        let builder = self.request(Method::DELETE, path).await;
        self.send_unit(builder).await
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .timeout(self.config.timeout);

        // Attach the session token when one is stored. A missing or
        // unreadable slot just means an unauthenticated request.
        match self.token_store.load().await {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(err) => tracing::warn!("could not read the token slot: {err}"),
        }

        builder
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> RemoteResult<T> {
        let response = Self::check_status(Self::send(builder).await?).await?;
        response
            .json()
            .await
            .map_err(|err| RemoteError::transport(format!("failed to decode response: {err}")))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> RemoteResult<()> {
        Self::check_status(Self::send(builder).await?).await?;
        Ok(())
    }

    async fn send(builder: RequestBuilder) -> RemoteResult<Response> {
        builder
            .send()
            .await
            .map_err(|err| RemoteError::transport(err.to_string()))
    }

    async fn check_status(response: Response) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The service reports failures as `{"detail": "..."}`; anything
        // else in the body is treated as no detail.
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);

        tracing::debug!(status = status.as_u16(), ?detail, "remote call failed");
        Err(RemoteError::api(status.as_u16(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyStore;

    #[async_trait::async_trait]
    impl caderno_core::auth::TokenStore for EmptyStore {
        async fn load(&self) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
        async fn save(&self, _token: &str) -> anyhow::Result<()> {
            Ok(())
        }
        async fn clear(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new(
            ApiConfig::new("http://localhost:8000/"),
            Arc::new(EmptyStore),
        );
        assert_eq!(client.url("/notes/"), "http://localhost:8000/notes/");
    }

    #[test]
    fn test_error_body_detail_is_optional() {
        let with: ErrorBody = serde_json::from_str(r#"{"detail":"Invalid credentials"}"#).unwrap();
        assert_eq!(with.detail.as_deref(), Some("Invalid credentials"));

        let without: ErrorBody = serde_json::from_str(r#"{"unexpected":"shape"}"#).unwrap();
        assert!(without.detail.is_none());
    }
}
