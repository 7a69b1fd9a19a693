//! HTTP transport to the Logibooks backend.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use logibooks_core::ClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;

/// Seam between stores and the backend.
///
/// Paths are relative to the configured API base, e.g. `countries/update`.
/// Implementations must be thread-safe (Send + Sync) for use in async contexts.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET {api}/{path}` and return the decoded JSON body.
    ///
    /// # Errors
    /// Returns error on network failure, non-success status, or invalid JSON.
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// `POST {api}/{path}` with an optional JSON body.
    ///
    /// An empty response body decodes as `Value::Null`.
    ///
    /// # Errors
    /// Returns error on network failure, non-success status, or invalid JSON.
    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value>;

    /// Set or clear the credentials sent with later requests.
    fn set_token(&self, _token: Option<String>) {}
}

/// `GET` a path and decode it into `T`.
///
/// # Errors
/// Returns the transport error, or `ClientError::Parse` if the shape differs.
pub async fn get_as<T>(transport: &dyn Transport, path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = transport.get_json(path).await?;
    serde_json::from_value(value).map_err(|e| ClientError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Production transport backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a transport for the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_timeout(config, Self::DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(config: ClientConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    /// The configuration this transport was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn current_token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn log_request(&self, method: &str, url: &str) {
        if self.config.enable_log {
            tracing::info!("{method} {url}");
        } else {
            tracing::debug!("{method} {url}");
        }
    }

    async fn decode(path: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|body| !body.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            return Err(ClientError::Api {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.config.endpoint(path);
        self.log_request("GET", &url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.config.endpoint(path);
        self.log_request("POST", &url);
        let mut builder = self.authorize(self.client.post(&url));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        Self::decode(path, response).await
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }
}
