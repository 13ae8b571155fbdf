//! Client error types
//!
//! Every failure the adapter reports surfaces as a [`ClientError`]: transport
//! failures without a response, HTTP-level failures the wrapped client flagged
//! itself, and completed exchanges whose status is 400 or above.

use bytes::Bytes;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Classification of a transport failure that produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The connection could not be established
    Connect,

    /// The request or response timed out
    Timeout,

    /// A redirect policy was violated
    Redirect,

    /// Reading or writing a body failed
    Body,

    /// Decoding the response failed
    Decode,

    /// The native request or client could not be built
    Builder,

    /// Any other failure while sending the request
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Redirect => "redirect",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Builder => "builder",
            Self::Request => "request",
        };
        f.write_str(name)
    }
}

/// The single error kind raised by the adapter.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The exchange could not be completed and carried no response.
    #[error("Transport error ({kind}): {message}")]
    Transport {
        /// What part of the exchange failed
        kind: TransportErrorKind,
        /// Message of the underlying failure
        message: String,
        /// Status code attached to the failure by the wrapped client, if any
        code: Option<u16>,
    },

    /// The wrapped client classified the exchange as a failed response.
    #[error("Bad response (status {status}): {}", String::from_utf8_lossy(.body))]
    BadResponse {
        /// HTTP status code
        status: u16,
        /// Full response body
        body: Bytes,
    },

    /// The exchange completed, but with a status of 400 or above.
    #[error("HTTP error (status {status}): {}", String::from_utf8_lossy(.body))]
    Status {
        /// HTTP status code
        status: u16,
        /// Full response body
        body: Bytes,
    },

    /// The request description could not be turned into a native request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Writing the response body to a sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response body could not be deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of the response this error wraps, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadResponse { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body for errors that wrap a response.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::BadResponse { body, .. } | Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The payload carried by this error.
    ///
    /// For errors wrapping a response this is the response body as text, for
    /// everything else the failure message.
    pub fn payload(&self) -> Cow<'_, str> {
        match self {
            Self::BadResponse { body, .. } | Self::Status { body, .. } => {
                String::from_utf8_lossy(body)
            }
            Self::Transport { message, .. } => Cow::Borrowed(message.as_str()),
            Self::InvalidRequest(message) => Cow::Borrowed(message.as_str()),
            Self::Io(err) => Cow::Owned(err.to_string()),
            Self::Serialization(err) => Cow::Owned(err.to_string()),
        }
    }

    /// Numeric code of the failure.
    ///
    /// The response status for errors wrapping a response, otherwise the
    /// status the wrapped client attached to the transport failure.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Transport { code, .. } => *code,
            _ => self.status(),
        }
    }

    /// Transport failure classification, if this is a transport error.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check if this error wraps an HTTP response with a failing status.
    pub fn is_status_error(&self) -> bool {
        self.status().is_some()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_redirect() {
            TransportErrorKind::Redirect
        } else if err.is_body() {
            TransportErrorKind::Body
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else if err.is_builder() {
            TransportErrorKind::Builder
        } else {
            TransportErrorKind::Request
        };

        Self::Transport {
            kind,
            message: err.to_string(),
            code: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidRequest(format!("invalid URL: {}", err))
    }
}

impl From<http::method::InvalidMethod> for ClientError {
    fn from(err: http::method::InvalidMethod) -> Self {
        Self::InvalidRequest(format!("invalid HTTP method: {}", err))
    }
}
