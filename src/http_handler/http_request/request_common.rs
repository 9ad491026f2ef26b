use crate::http_handler::http_client::BoxError;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The standard HTTP request methods.
///
/// `FluentRequest` accepts any method string; this enum only saves callers from
/// spelling the common verbs out by hand.
#[derive(Debug, Display, AsRefStr, EnumString, EnumIter, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HTTPRequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
}

impl From<HTTPRequestMethod> for String {
    fn from(value: HTTPRequestMethod) -> Self { value.as_ref().to_owned() }
}

impl From<HTTPRequestMethod> for reqwest::Method {
    fn from(value: HTTPRequestMethod) -> Self {
        match value {
            HTTPRequestMethod::Get => reqwest::Method::GET,
            HTTPRequestMethod::Head => reqwest::Method::HEAD,
            HTTPRequestMethod::Post => reqwest::Method::POST,
            HTTPRequestMethod::Put => reqwest::Method::PUT,
            HTTPRequestMethod::Patch => reqwest::Method::PATCH,
            HTTPRequestMethod::Delete => reqwest::Method::DELETE,
            HTTPRequestMethod::Options => reqwest::Method::OPTIONS,
            HTTPRequestMethod::Trace => reqwest::Method::TRACE,
            HTTPRequestMethod::Connect => reqwest::Method::CONNECT,
        }
    }
}

/// Reasons why the configured state of a builder can not be turned into a request.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum InvalidRequestKind {
    #[strum(to_string = "no request method configured")]
    MissingMethod,
    #[strum(to_string = "`{method}` is not a valid request method")]
    BadMethod { method: String },
    #[strum(to_string = "no url configured")]
    MissingUrl,
    #[strum(to_string = "`{url}` is not a valid url: {reason}")]
    BadUrl { url: String, reason: String },
    #[strum(to_string = "url scheme `{scheme}` is not supported")]
    UnsupportedScheme { scheme: String },
    #[strum(to_string = "`{name}` is not a valid header name")]
    BadHeaderName { name: String },
    #[strum(to_string = "value of header `{name}` is not a valid header value")]
    BadHeaderValue { name: String },
    #[strum(to_string = "streaming body was already sent by a previous run")]
    BodyConsumed,
    #[strum(to_string = "request was rejected before dispatch: {reason}")]
    Rejected { reason: String },
}

/// Errors returned by [`FluentRequest::run`](super::fluent_request::FluentRequest::run).
///
/// `InvalidRequest` is raised before any network I/O happens, `TransportError` means
/// the request was well-formed but the round trip failed. HTTP error statuses are not
/// errors at this level.
#[derive(Debug, Display)]
pub enum RequestError {
    #[strum(to_string = "invalid request: {kind}")]
    InvalidRequest { kind: InvalidRequestKind },
    #[strum(to_string = "transport error: {source}")]
    TransportError { source: BoxError },
}

impl RequestError {
    /// Returns the invalid request kind, if this is an `InvalidRequest`.
    pub fn invalid_kind(&self) -> Option<&InvalidRequestKind> {
        match self {
            RequestError::InvalidRequest { kind } => Some(kind),
            RequestError::TransportError { .. } => None,
        }
    }

    pub fn is_invalid_request(&self) -> bool { self.invalid_kind().is_some() }

    pub fn is_transport_error(&self) -> bool { !self.is_invalid_request() }

    /// True if the transport gave up because a timeout elapsed.
    pub fn is_timeout(&self) -> bool { self.reqwest_source().is_some_and(reqwest::Error::is_timeout) }

    /// True if the transport failed to establish a connection.
    pub fn is_connect(&self) -> bool { self.reqwest_source().is_some_and(reqwest::Error::is_connect) }

    fn reqwest_source(&self) -> Option<&reqwest::Error> {
        match self {
            RequestError::TransportError { source } => source.downcast_ref::<reqwest::Error>(),
            RequestError::InvalidRequest { .. } => None,
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::InvalidRequest { .. } => None,
            RequestError::TransportError { source } => Some(source.as_ref()),
        }
    }
}

impl From<InvalidRequestKind> for RequestError {
    fn from(kind: InvalidRequestKind) -> Self { RequestError::InvalidRequest { kind } }
}

impl From<BoxError> for RequestError {
    fn from(source: BoxError) -> Self {
        match source.downcast::<reqwest::Error>() {
            Ok(err) => RequestError::from(*err),
            Err(source) => RequestError::TransportError { source },
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_builder() {
            RequestError::InvalidRequest {
                kind: InvalidRequestKind::Rejected { reason: value.to_string() },
            }
        } else {
            RequestError::TransportError { source: Box::new(value) }
        }
    }
}
