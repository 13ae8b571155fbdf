//! Raw HTTP transport adapter
//!
//! Maps a generic request description (method, URL, body, headers, options)
//! onto `reqwest` and normalizes what comes back into a small set of types.
//!
//! # Architecture
//!
//! - **HttpAdapter**: executes single requests and concurrent batches
//! - **RawResponse**: headers, body and status of an exchange below 400
//! - **ClientError**: the one error type for transport failures and failing statuses
//! - **HttpClient trait**: the seam callers program against
//!
//! The adapter does not retry, rate limit, authenticate or cache. Those belong
//! to the wrapped client or to the caller.
//!
//! # Usage
//!
//! ```no_run
//! use rawhttp::{HttpAdapter, RawRequest};
//!
//! # async fn example() -> rawhttp::Result<()> {
//! let adapter = HttpAdapter::new()?;
//! let request = RawRequest::new("GET", "https://api.example.com/x")
//!     .with_header("Accept", "text/plain");
//! let response = adapter.send(request).await?;
//! println!("{} {:?}", response.status_code(), response.text());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod traits;

#[cfg(feature = "blocking")]
pub mod blocking;

// Re-export commonly used types
pub use config::AdapterConfig;
pub use error::{ClientError, Result, TransportErrorKind};
pub use crate::http::{
    BatchEntry, BatchOutcome, HttpAdapter, RawRequest, RawResponse, RequestBody, RequestOptions,
    Sink,
};
pub use traits::HttpClient;

#[cfg(feature = "blocking")]
pub use blocking::BlockingHttpAdapter;
