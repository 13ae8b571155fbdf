//! Batch request entries
//!
//! A batch is a caller-owned list of [`BatchEntry`] values. The adapter
//! dispatches every entry concurrently, waits for all of them to settle, and
//! then either annotates the entries in place, stopping at the first failure
//! in entry order, or hands back one [`BatchOutcome`] holding every entry's
//! result by id.

use super::options::RequestOptions;
use super::request::{RawRequest, RequestBody};
use super::response::RawResponse;
use crate::error::Result;
use std::collections::HashMap;

/// One request in a batch, identified by a caller-supplied key.
#[derive(Debug)]
pub struct BatchEntry<K> {
    /// Caller-supplied identifier
    pub id: K,

    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request URL
    pub url: String,

    /// Request body
    pub body: RequestBody,

    /// Request headers, sent as an empty set when absent
    pub headers: Option<HashMap<String, String>>,

    /// Options forwarded to the wrapped client
    pub options: RequestOptions,

    /// Response filled in once the entry's exchange succeeded
    pub response: Option<RawResponse>,
}

impl<K> BatchEntry<K> {
    /// Create a new batch entry
    pub fn new(id: K, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            method: method.into(),
            url: url.into(),
            body: RequestBody::Empty,
            headers: None,
            options: RequestOptions::default(),
            response: None,
        }
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the options forwarded to the wrapped client
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Fold body, headers and options into a request, leaving this entry's
    /// request fields drained.
    pub(crate) fn take_request(&mut self) -> RawRequest {
        RawRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            body: std::mem::take(&mut self.body),
            headers: self.headers.take().unwrap_or_default(),
            options: std::mem::take(&mut self.options),
        }
    }

    pub(crate) fn into_request(mut self) -> (K, RawRequest) {
        let request = self.take_request();
        (self.id, request)
    }
}

/// Per-entry outcomes of a batch where failures do not abort the others.
#[derive(Debug)]
pub struct BatchOutcome<K> {
    results: HashMap<K, Result<RawResponse>>,
}

impl<K: Eq + std::hash::Hash> BatchOutcome<K> {
    pub(crate) fn new(results: HashMap<K, Result<RawResponse>>) -> Self {
        Self { results }
    }

    /// Get the outcome for an id.
    pub fn get(&self, id: &K) -> Option<&Result<RawResponse>> {
        self.results.get(id)
    }

    /// Number of entries in the batch.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Check if every entry succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(Result::is_ok)
    }

    /// Iterate over the ids of failed entries.
    pub fn failed_ids(&self) -> impl Iterator<Item = &K> {
        self.results
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(id, _)| id)
    }

    /// Consume the outcome and return the underlying map.
    pub fn into_inner(self) -> HashMap<K, Result<RawResponse>> {
        self.results
    }
}
