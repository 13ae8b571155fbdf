//! Structured logging for exchanges
//!
//! Every request the adapter sends and every outcome it produces is logged
//! through this module, so the field names stay consistent between the
//! single-request and batch paths.

use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request body size in bytes, when known
    pub body_size: Option<usize>,
    /// Whether the body is diverted to a sink
    pub sink: bool,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body_size: None,
            sink: false,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: Option<usize>) -> Self {
        self.body_size = size;
        self
    }

    /// Mark the response body as diverted to a sink
    pub fn with_sink(mut self, sink: bool) -> Self {
        self.sink = sink;
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            sink = self.sink,
            "Sending HTTP request"
        );
    }
}

/// Response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes, when known
    pub body_size: Option<usize>,
    /// Time elapsed for the exchange
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log completed exchange
    pub fn log_success(&self, request: &RequestMetadata) {
        debug!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP request completed"
        );
    }

    /// Log exchange rejected because of its status
    pub fn log_rejected(&self, request: &RequestMetadata) {
        warn!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP request rejected"
        );
    }
}

/// Log an exchange that produced no response
pub fn log_transport_failure(request: &RequestMetadata, elapsed: Duration, error: &str) {
    warn!(
        method = %request.method,
        url = %request.url,
        elapsed_ms = elapsed.as_millis(),
        error = %error,
        "HTTP request failed without a response"
    );
}

/// Timer for measuring request duration
#[derive(Debug)]
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
