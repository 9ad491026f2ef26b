use crate::warn;
use reqwest::header::HeaderMap;
use std::time::Duration;

const TIMEOUT_ENV: &str = "FLUENT_REQUEST_TIMEOUT_SECS";
const CONNECT_TIMEOUT_ENV: &str = "FLUENT_REQUEST_CONNECT_TIMEOUT_SECS";
const USER_AGENT_ENV: &str = "FLUENT_REQUEST_USER_AGENT";
const MAX_REDIRECTS_ENV: &str = "FLUENT_REQUEST_MAX_REDIRECTS";

/// Settings for the `reqwest::Client` behind an [`HTTPClient`](super::http_client::HTTPClient).
///
/// Everything here is a transport concern; the request builder itself never reads it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for the whole round trip, `None` waits forever.
    timeout: Option<Duration>,
    /// Timeout for establishing the connection only.
    connect_timeout: Option<Duration>,
    /// Value for the `User-Agent` header, unless a request sets its own.
    user_agent: Option<String>,
    /// Headers sent with every request unless the request sets the same name.
    default_headers: HeaderMap,
    /// Maximum number of redirects followed, 0 disables redirects.
    max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: None,
            default_headers: HeaderMap::new(),
            max_redirects: Self::DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Same limit reqwest uses on its own.
    pub const DEFAULT_MAX_REDIRECTS: usize = 10;

    /// Reads the configuration from the `FLUENT_REQUEST_*` environment variables.
    ///
    /// Unset variables keep their defaults, unparseable ones are reported and ignored.
    pub fn from_env() -> Self { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Like [`ClientConfig::from_env`], but resolves variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let mut config = Self::default();
        if let Some(secs) = Self::parse_var::<u64>(&lookup, TIMEOUT_ENV) {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = Self::parse_var::<u64>(&lookup, CONNECT_TIMEOUT_ENV) {
            config.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(max) = Self::parse_var::<usize>(&lookup, MAX_REDIRECTS_ENV) {
            config.max_redirects = max;
        }
        config.user_agent = lookup(USER_AGENT_ENV).filter(|ua| !ua.is_empty());
        config
    }

    fn parse_var<T: std::str::FromStr>(
        lookup: &impl Fn(&str) -> Option<String>,
        key: &str,
    ) -> Option<T> {
        let raw = lookup(key)?;
        match raw.trim().parse::<T>() {
            Ok(val) => Some(val),
            Err(_) => {
                warn!("Ignoring {key}: '{raw}' is not a valid value");
                None
            }
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn timeout(&self) -> Option<Duration> { self.timeout }
    pub fn connect_timeout(&self) -> Option<Duration> { self.connect_timeout }
    pub fn user_agent(&self) -> Option<&str> { self.user_agent.as_deref() }
    pub fn default_headers(&self) -> &HeaderMap { &self.default_headers }
    pub fn max_redirects(&self) -> usize { self.max_redirects }

    /// Transfers these settings onto a `reqwest::ClientBuilder`.
    pub(crate) fn apply(&self, mut builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let policy = if self.max_redirects == 0 {
            reqwest::redirect::Policy::none()
        } else {
            reqwest::redirect::Policy::limited(self.max_redirects)
        };
        builder.default_headers(self.default_headers.clone()).redirect(policy)
    }
}
