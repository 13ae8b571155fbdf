//! Client trait
//!
//! Defines the seam between callers and the adapter, so a different
//! implementation (a recording double, another HTTP stack) can stand in for
//! [`HttpAdapter`](crate::http::HttpAdapter).

use crate::error::Result;
use crate::http::{BatchEntry, RawRequest, RawResponse};
use async_trait::async_trait;

/// Generic raw HTTP client
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and receive the normalized response.
    ///
    /// Statuses of 400 and above must surface as an error carrying the body.
    async fn send(&self, request: RawRequest) -> Result<RawResponse>;

    /// Send every entry concurrently and fill in each entry's `response`.
    ///
    /// Stops at the first failing entry in entry order.
    async fn send_batch<K: Send>(&self, entries: &mut [BatchEntry<K>]) -> Result<()>;
}
