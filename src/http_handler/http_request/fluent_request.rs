use super::request_common::{InvalidRequestKind, RequestError};
use crate::event;
use crate::http_handler::http_client::{HTTPClient, Transport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// The body configured on a builder.
#[derive(Debug)]
enum RequestBody {
    /// In-memory bytes, re-sent by every run.
    Buffered(Vec<u8>),
    /// A byte stream; `None` once a run has sent it.
    Streaming(Option<reqwest::Body>),
}

/// A chainable HTTP request description plus the transport it is sent through.
///
/// All `with_*` calls overwrite the previous value of their field. Nothing is validated
/// and no network resources are touched until [`FluentRequest::run`] is awaited; the
/// configuration survives a run, so the same builder can be run again or tweaked for a
/// follow-up request.
#[derive(Debug)]
pub struct FluentRequest<T: Transport = HTTPClient> {
    method: String,
    url: String,
    body: Option<RequestBody>,
    headers: Vec<(String, Vec<String>)>,
    transport: T,
}

impl FluentRequest<HTTPClient> {
    /// Creates an empty builder backed by a fresh [`HTTPClient`].
    pub fn new() -> Self { Self::with_transport(HTTPClient::new()) }
}

impl Default for FluentRequest<HTTPClient> {
    fn default() -> Self { Self::new() }
}

impl<T: Transport> FluentRequest<T> {
    /// Creates an empty builder that dispatches through `transport`.
    pub fn with_transport(transport: T) -> Self {
        Self { method: String::new(), url: String::new(), body: None, headers: Vec::new(), transport }
    }

    /// Sets the request method. Any string is accepted here, it is validated by `run`.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the absolute URL the request is sent to.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request body.
    ///
    /// In-memory bodies (bytes, strings, vectors) are kept and sent again by each run.
    /// Streaming bodies (`reqwest::Body::wrap_stream`) can only be sent once.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<reqwest::Body>) -> Self {
        let body = body.into();
        self.body = Some(match body.as_bytes() {
            Some(bytes) => RequestBody::Buffered(bytes.to_vec()),
            None => RequestBody::Streaming(Some(body)),
        });
        self
    }

    /// Removes any configured body.
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Replaces the complete header set. Each name maps to its values in sending order.
    #[must_use]
    pub fn with_headers<I, K, V, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(name, values)| (name.into(), values.into_iter().map(Into::into).collect()))
            .collect();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn url(&self) -> &str { &self.url }
    pub fn headers(&self) -> &[(String, Vec<String>)] { &self.headers }
    pub fn has_body(&self) -> bool { self.body.is_some() }
    pub fn transport(&self) -> &T { &self.transport }

    /// Assembles the request from the current configuration and sends it.
    ///
    /// Any status code the server answers with is returned as `Ok`; the body has not
    /// been read yet when this returns.
    ///
    /// # Errors
    /// * `InvalidRequest` if method, URL or headers are unusable, or a streaming body
    ///   was consumed by an earlier run. No I/O has happened in that case.
    /// * `TransportError` if the round trip itself failed.
    pub async fn run(&mut self) -> Result<reqwest::Response, RequestError> {
        self.dispatch(None).await
    }

    /// Like [`FluentRequest::run`], but gives the transport `timeout` for this round trip.
    ///
    /// # Errors
    /// See [`FluentRequest::run`]; an elapsed timeout is a `TransportError`.
    pub async fn run_with_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<reqwest::Response, RequestError> {
        self.dispatch(Some(timeout)).await
    }

    async fn dispatch(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, RequestError> {
        let mut request = self.assemble()?;
        if let Some(timeout) = timeout {
            *request.timeout_mut() = Some(timeout);
        }
        event!("Dispatching {} {}", request.method(), request.url());
        let response = self.transport.execute(request).await?;
        event!("Received {} from {}", response.status(), response.url());
        Ok(response)
    }

    fn assemble(&mut self) -> Result<reqwest::Request, RequestError> {
        let method = self.parse_method()?;
        let url = self.parse_url()?;
        let headers = self.header_map()?;

        let mut request = reqwest::Request::new(method, url);
        *request.headers_mut() = headers;
        *request.body_mut() = match &mut self.body {
            None => None,
            Some(RequestBody::Buffered(bytes)) => Some(reqwest::Body::from(bytes.clone())),
            Some(RequestBody::Streaming(stream)) => {
                Some(stream.take().ok_or(InvalidRequestKind::BodyConsumed)?)
            }
        };
        Ok(request)
    }

    fn parse_method(&self) -> Result<reqwest::Method, InvalidRequestKind> {
        if self.method.is_empty() {
            return Err(InvalidRequestKind::MissingMethod);
        }
        reqwest::Method::from_bytes(self.method.as_bytes())
            .map_err(|_| InvalidRequestKind::BadMethod { method: self.method.clone() })
    }

    fn parse_url(&self) -> Result<reqwest::Url, InvalidRequestKind> {
        if self.url.trim().is_empty() {
            return Err(InvalidRequestKind::MissingUrl);
        }
        let url = reqwest::Url::parse(&self.url).map_err(|e| InvalidRequestKind::BadUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(InvalidRequestKind::UnsupportedScheme { scheme: scheme.to_owned() }),
        }
    }

    fn header_map(&self) -> Result<HeaderMap, InvalidRequestKind> {
        let mut map = HeaderMap::new();
        for (name, values) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| InvalidRequestKind::BadHeaderName { name: name.clone() })?;
            for value in values {
                let header_value = HeaderValue::from_str(value)
                    .map_err(|_| InvalidRequestKind::BadHeaderValue { name: name.clone() })?;
                map.append(header_name.clone(), header_value);
            }
        }
        Ok(map)
    }
}
