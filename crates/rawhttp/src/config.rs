//! Configuration for the wrapped HTTP client

use crate::error::{ClientError, Result};
use http::HeaderMap;
use std::time::Duration;

/// Configuration used to build the `reqwest` client the adapter wraps.
///
/// None of these settings change what the adapter does with a response; they
/// only shape the wrapped client. There is no overall timeout by default.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Timeout for a whole exchange, if any
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Headers sent with every request
    pub default_headers: HeaderMap,

    /// Proxy URL for all traffic
    pub proxy: Option<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
            user_agent: None,
            default_headers: HeaderMap::new(),
            proxy: None,
        }
    }
}

impl AdapterConfig {
    /// Set the overall timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value contains invalid characters.
    pub fn with_default_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self> {
        let (name, value) = crate::http::client::parse_header(key.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `RAWHTTP_TIMEOUT` for the overall timeout (in seconds)
    /// - `RAWHTTP_CONNECT_TIMEOUT` for the connection timeout (in seconds)
    /// - `RAWHTTP_USER_AGENT` for the User-Agent header
    /// - `RAWHTTP_PROXY` for a proxy URL
    ///
    /// A `.env` file in the working directory is read first, if present.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout_str) = dotenvy::var("RAWHTTP_TIMEOUT") {
            config.timeout = Some(parse_seconds("RAWHTTP_TIMEOUT", &timeout_str)?);
        }

        if let Ok(timeout_str) = dotenvy::var("RAWHTTP_CONNECT_TIMEOUT") {
            config.connect_timeout = parse_seconds("RAWHTTP_CONNECT_TIMEOUT", &timeout_str)?;
        }

        if let Ok(user_agent) = dotenvy::var("RAWHTTP_USER_AGENT") {
            config.user_agent = Some(user_agent);
        }

        if let Ok(proxy) = dotenvy::var("RAWHTTP_PROXY") {
            config.proxy = Some(proxy);
        }

        Ok(config)
    }

    /// Build the `reqwest` client described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the client cannot be built.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .default_headers(self.default_headers.clone());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| ClientError::InvalidRequest(format!("invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(ClientError::from)
    }
}

#[cfg(feature = "env")]
fn parse_seconds(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ClientError::InvalidRequest(format!("{} must be a number of seconds: {}", name, e))
        })
}
