//! Blocking adapter
//!
//! Runs the async adapter on a private current-thread runtime so callers
//! without an async context can issue the same exchanges. Must not be used
//! from inside another tokio runtime.

use crate::config::AdapterConfig;
use crate::error::Result;
use crate::http::{BatchEntry, BatchOutcome, HttpAdapter, RawRequest, RawResponse};
use std::hash::Hash;
use tokio::runtime::{Builder, Runtime};

/// Synchronous wrapper around [`HttpAdapter`]
#[derive(Debug)]
pub struct BlockingHttpAdapter {
    inner: HttpAdapter,
    runtime: Runtime,
}

impl BlockingHttpAdapter {
    /// Create a blocking adapter around a default client
    pub fn new() -> Result<Self> {
        Self::with_config(AdapterConfig::default())
    }

    /// Create a blocking adapter around a client built from configuration
    pub fn with_config(config: AdapterConfig) -> Result<Self> {
        Self::with_adapter(HttpAdapter::with_config(config)?)
    }

    /// Wrap an existing adapter
    pub fn with_adapter(inner: HttpAdapter) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Get the wrapped async adapter
    pub fn adapter(&self) -> &HttpAdapter {
        &self.inner
    }

    /// Send a request, blocking until the exchange completes.
    pub fn send(&self, request: RawRequest) -> Result<RawResponse> {
        self.runtime.block_on(self.inner.send(request))
    }

    /// Send a batch, blocking until every entry has settled.
    pub fn send_batch<K>(&self, entries: &mut [BatchEntry<K>]) -> Result<()> {
        self.runtime.block_on(self.inner.send_batch(entries))
    }

    /// Send a batch and report each outcome by id, blocking until all settle.
    pub fn send_batch_settled<K>(&self, entries: Vec<BatchEntry<K>>) -> BatchOutcome<K>
    where
        K: Eq + Hash,
    {
        self.runtime.block_on(self.inner.send_batch_settled(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_adapter_creation() {
        let adapter = BlockingHttpAdapter::new().expect("Failed to create blocking adapter");
        assert!(adapter.adapter().client().get("http://localhost").build().is_ok());
    }

    #[test]
    fn test_blocking_send_reports_invalid_url() {
        let adapter = BlockingHttpAdapter::new().unwrap();
        let result = adapter.send(RawRequest::new("GET", "::"));
        assert!(matches!(result, Err(crate::ClientError::InvalidRequest(_))));
    }
}
