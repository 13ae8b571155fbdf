//! HTTP adapter implementation
//!
//! Provides the reqwest-backed adapter together with the raw request,
//! option, response and batch types it speaks.

pub mod batch;
pub mod client;
pub mod options;
pub mod request;
pub mod response;

pub use batch::{BatchEntry, BatchOutcome};
pub use client::HttpAdapter;
pub use options::{RequestOptions, Sink};
pub use request::{RawRequest, RequestBody};
pub use response::RawResponse;
