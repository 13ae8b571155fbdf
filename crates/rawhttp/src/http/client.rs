//! HTTP adapter implementation
//!
//! Turns a [`RawRequest`] into a `reqwest` request, executes it, and
//! normalizes the outcome into a [`RawResponse`] or a [`ClientError`].
//! No retries, no rate limiting, no state kept between calls.

use super::batch::{BatchEntry, BatchOutcome};
use super::options::{RequestOptions, Sink};
use super::request::{RawRequest, RequestBody};
use super::response::RawResponse;
use crate::config::AdapterConfig;
use crate::error::{ClientError, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata, log_transport_failure};
use crate::traits::HttpClient;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::future::join_all;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::collections::HashMap;
use std::hash::Hash;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use url::Url;

/// HTTP transport adapter
///
/// Wraps a `reqwest::Client` and exposes the raw request/response contract:
/// - statuses below 400 become a [`RawResponse`]
/// - statuses of 400 and above become a [`ClientError`] carrying the body
/// - failures without a response become [`ClientError::Transport`]
#[derive(Clone, Debug)]
pub struct HttpAdapter {
    client: reqwest::Client,
}

/// A settled exchange, before its status is checked.
struct Exchange {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
    http_errors: bool,
    metadata: RequestMetadata,
    timer: RequestTimer,
}

impl Exchange {
    fn into_response(self) -> Result<RawResponse> {
        let outcome = ResponseMetadata::new(self.status, self.timer.elapsed())
            .with_body_size(self.body.len());

        if self.status >= 400 {
            outcome.log_rejected(&self.metadata);
            return Err(if self.http_errors {
                ClientError::BadResponse {
                    status: self.status,
                    body: self.body,
                }
            } else {
                ClientError::Status {
                    status: self.status,
                    body: self.body,
                }
            });
        }

        outcome.log_success(&self.metadata);
        Ok(RawResponse::from_parts(&self.headers, self.body, self.status))
    }
}

impl HttpAdapter {
    /// Create a new adapter around a default `reqwest` client
    pub fn new() -> Result<Self> {
        Self::with_config(AdapterConfig::default())
    }

    /// Create a new adapter around a client built from configuration
    pub fn with_config(config: AdapterConfig) -> Result<Self> {
        Ok(Self::with_client(config.build_client()?))
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Send a request and return the normalized response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no response was received,
    /// [`ClientError::BadResponse`] or [`ClientError::Status`] when the status
    /// is 400 or above, [`ClientError::InvalidRequest`] when the request
    /// cannot be built, and [`ClientError::Io`] when writing to a sink fails.
    pub async fn send(&self, request: RawRequest) -> Result<RawResponse> {
        self.execute(request).await?.into_response()
    }

    /// Send a request given as separate parts.
    pub async fn send_parts(
        &self,
        url: impl Into<String>,
        method: impl Into<String>,
        body: impl Into<RequestBody>,
        headers: HashMap<String, String>,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let request = RawRequest::new(method, url)
            .with_body(body)
            .with_headers(headers)
            .with_options(options);
        self.send(request).await
    }

    /// Send every entry concurrently and annotate each entry with its response.
    ///
    /// All requests are dispatched at once and awaited together; none is
    /// cancelled. Results are then inspected in entry order, and the first
    /// failing entry aborts the batch: a failure without a response aborts
    /// with that transport error, a status of 400 or above aborts with that
    /// entry's body. Entries before it keep their `response`, later ones stay
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns the first failure found in entry order.
    pub async fn send_batch<K>(&self, entries: &mut [BatchEntry<K>]) -> Result<()> {
        debug!(count = entries.len(), "Dispatching batch");

        let pending: Vec<_> = entries
            .iter_mut()
            .map(|entry| self.execute(entry.take_request()))
            .collect();

        let settled = join_all(pending).await;

        for (entry, exchange) in entries.iter_mut().zip(settled) {
            entry.response = Some(exchange?.into_response()?);
        }

        debug!(count = entries.len(), "Batch completed");
        Ok(())
    }

    /// Send every entry concurrently and report each outcome by id.
    ///
    /// Unlike [`send_batch`](Self::send_batch), one failing entry does not
    /// affect the others. If two entries share an id, the later one wins.
    pub async fn send_batch_settled<K>(&self, entries: Vec<BatchEntry<K>>) -> BatchOutcome<K>
    where
        K: Eq + Hash,
    {
        debug!(count = entries.len(), "Dispatching settled batch");

        let (ids, requests): (Vec<K>, Vec<RawRequest>) =
            entries.into_iter().map(BatchEntry::into_request).unzip();

        let settled = join_all(requests.into_iter().map(|request| self.send(request))).await;
        let outcome = BatchOutcome::new(ids.into_iter().zip(settled).collect());

        debug!(
            count = outcome.len(),
            all_succeeded = outcome.all_succeeded(),
            "Settled batch completed"
        );
        outcome
    }

    async fn execute(&self, request: RawRequest) -> Result<Exchange> {
        let RawRequest {
            method,
            url,
            body,
            headers,
            options,
        } = request;

        let metadata = RequestMetadata::new(&method, &url)
            .with_body_size(body.len())
            .with_sink(options.has_sink());
        metadata.log_request();

        let RequestOptions {
            sink,
            timeout,
            query,
            http_errors,
        } = options;

        let mut builder = self
            .client
            .request(parse_method(&method)?, Url::parse(&url)?)
            .headers(parse_headers(&headers)?);

        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if !matches!(body, RequestBody::Empty) {
            builder = builder.body(body);
        }

        let timer = RequestTimer::start();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = ClientError::from(err);
                log_transport_failure(&metadata, timer.elapsed(), &err.to_string());
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();

        // Failing bodies always come back in memory so the error can carry them.
        let body = match sink {
            Some(sink) if status < 400 => {
                let written = write_to_sink(response, sink).await?;
                debug!(url = %metadata.url, bytes = written, "Response body written to sink");
                Bytes::new()
            }
            _ => response.bytes().await?,
        };

        Ok(Exchange {
            status,
            headers: response_headers,
            body,
            http_errors,
            metadata,
            timer,
        })
    }
}

#[async_trait]
impl HttpClient for HttpAdapter {
    async fn send(&self, request: RawRequest) -> Result<RawResponse> {
        HttpAdapter::send(self, request).await
    }

    async fn send_batch<K: Send>(&self, entries: &mut [BatchEntry<K>]) -> Result<()> {
        HttpAdapter::send_batch(self, entries).await
    }
}

/// Standard methods match case-insensitively; extension methods are sent as
/// given, since method names are case-sensitive on the wire.
fn parse_method(method: &str) -> Result<Method> {
    let standard = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
        Method::PATCH,
        Method::TRACE,
        Method::CONNECT,
    ];
    if let Some(known) = standard
        .into_iter()
        .find(|known| known.as_str().eq_ignore_ascii_case(method))
    {
        return Ok(known);
    }
    Ok(Method::from_bytes(method.as_bytes())?)
}

/// Validate a header name and value.
pub(crate) fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
        ClientError::InvalidRequest(format!("invalid header name '{}': {}", key, e))
    })?;
    let value = HeaderValue::from_str(value).map_err(|e| {
        ClientError::InvalidRequest(format!("invalid header value for '{}': {}", key, e))
    })?;
    Ok((name, value))
}

fn parse_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let (name, value) = parse_header(key, value)?;
        map.insert(name, value);
    }
    Ok(map)
}

async fn write_to_sink(response: reqwest::Response, sink: Sink) -> Result<u64> {
    match sink {
        Sink::Path(path) => {
            let file = tokio::fs::File::create(&path).await?;
            let written = copy_body(response, file).await;
            if written.is_err() {
                // Never leave a truncated download behind.
                if let Err(err) = tokio::fs::remove_file(&path).await {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Failed to remove partial sink file"
                    );
                }
            }
            written
        }
        Sink::Writer(writer) => copy_body(response, writer).await,
    }
}

async fn copy_body<W>(response: reqwest::Response, mut writer: W) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;
    Ok(written)
}
