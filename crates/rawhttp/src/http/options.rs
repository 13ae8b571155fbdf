//! Options forwarded to the wrapped client

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWrite;

/// Destination that receives the response body instead of the returned value.
pub enum Sink {
    /// Write the body to a file, created or truncated. The file is removed
    /// if the body cannot be read to completion.
    Path(PathBuf),

    /// Write the body into a caller-supplied writer. Bytes already written
    /// stay written if the body fails midway.
    Writer(Box<dyn AsyncWrite + Send + Unpin>),
}

impl Sink {
    /// Create a sink from any async writer.
    pub fn writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self::Writer(Box::new(writer))
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

impl From<PathBuf> for Sink {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&std::path::Path> for Sink {
    fn from(path: &std::path::Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Per-request options understood by the wrapped client.
///
/// The adapter does not interpret these beyond handing them to `reqwest`,
/// except for `sink`, which changes what the returned body holds.
#[derive(Debug)]
pub struct RequestOptions {
    /// Divert the response body to this destination
    pub sink: Option<Sink>,

    /// Timeout for the whole exchange
    pub timeout: Option<Duration>,

    /// Query parameters appended to the URL
    pub query: Vec<(String, String)>,

    /// Let the wrapped client flag statuses of 400 and above as bad responses
    pub http_errors: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            sink: None,
            timeout: None,
            query: Vec::new(),
            http_errors: true,
        }
    }
}

impl RequestOptions {
    /// Create the default option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Divert the response body to a sink
    pub fn with_sink(mut self, sink: impl Into<Sink>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Toggle bad-response classification in the wrapped client
    pub fn with_http_errors(mut self, enabled: bool) -> Self {
        self.http_errors = enabled;
        self
    }

    /// Check if the body is diverted away from the returned value.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RequestOptions::default();

        assert!(options.sink.is_none());
        assert!(options.timeout.is_none());
        assert!(options.query.is_empty());
        assert!(options.http_errors);
        assert!(!options.has_sink());
    }

    #[test]
    fn test_builder() {
        let options = RequestOptions::new()
            .with_sink(PathBuf::from("/tmp/download.bin"))
            .with_timeout(Duration::from_secs(5))
            .with_query("page", "2")
            .with_http_errors(false);

        assert!(options.has_sink());
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.query, vec![("page".to_string(), "2".to_string())]);
        assert!(!options.http_errors);
        assert_eq!(
            format!("{:?}", options.sink),
            "Some(Path(\"/tmp/download.bin\"))"
        );
    }

    #[test]
    fn test_writer_sink_debug() {
        let sink = Sink::writer(Vec::<u8>::new());
        assert_eq!(format!("{:?}", sink), "Writer(..)");
    }
}
