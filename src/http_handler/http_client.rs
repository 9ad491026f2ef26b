use super::client_config::ClientConfig;
use super::http_request::request_common::RequestError;
use std::sync::Arc;

/// Type-erased error produced by a [`Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Something that can perform a full HTTP round trip for an assembled request.
///
/// The builder only ever talks to this trait, so tests can substitute a fake for the
/// real network. Implementations must tolerate concurrent `execute` calls.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and resolves once the response head has been received.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, BoxError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, BoxError> {
        (**self).execute(request).await
    }
}

/// A simple wrapper around `reqwest::Client`, the default transport of a `FluentRequest`.
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone, Default)]
pub struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with reqwest's default settings.
    pub fn new() -> HTTPClient { HTTPClient { client: reqwest::Client::new() } }

    /// Constructs a new `HTTPClient` from the given configuration.
    ///
    /// # Errors
    /// Returns a `TransportError` if the TLS backend or resolver cannot be initialized.
    pub fn with_config(config: &ClientConfig) -> Result<HTTPClient, RequestError> {
        let client = config.apply(reqwest::Client::builder()).build().map_err(|e| {
            RequestError::TransportError { source: Box::new(e) }
        })?;
        Ok(HTTPClient { client })
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> HTTPClient { HTTPClient { client } }

    /// Returns a reference to the internal `reqwest::Client`.
    pub fn client(&self) -> &reqwest::Client { &self.client }
}

#[async_trait::async_trait]
impl Transport for HTTPClient {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, BoxError> {
        Ok(self.client.execute(request).await?)
    }
}
