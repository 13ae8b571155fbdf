//! Normalized raw response

use crate::error::{ClientError, Result};
use bytes::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Normalized result of a completed HTTP exchange.
///
/// Only ever built for statuses below 400; anything else becomes a
/// [`ClientError`]. Header names are stored lowercased, each with every value
/// received for it in wire order. The body is empty when the request diverted
/// it to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    headers: HashMap<String, Vec<String>>,
    body: Bytes,
    status_code: u16,
}

impl RawResponse {
    /// Create a new raw response.
    ///
    /// Header names are lowercased; values of names that differ only in case
    /// are merged in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] if `status_code` is 400 or
    /// above, since such an exchange is reported as an error instead.
    pub fn new<I>(headers: I, body: impl Into<Bytes>, status_code: u16) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        if status_code >= 400 {
            return Err(ClientError::InvalidRequest(format!(
                "status {} cannot form a raw response",
                status_code
            )));
        }

        let mut normalized: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }

        Ok(Self {
            headers: normalized,
            body: body.into(),
            status_code,
        })
    }

    pub(crate) fn from_parts(headers: &HeaderMap, body: Bytes, status_code: u16) -> Self {
        Self {
            headers: collect_headers(headers),
            body,
            status_code,
        }
    }

    /// Get the HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Get all headers.
    pub fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Get every value of a header (case-insensitive).
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the first value of a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).first().map(String::as_str)
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Get the body as a string.
    pub fn text(&self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::from)
    }

    /// Check if the response is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Group header values by lowercased name, keeping wire order per name.
pub(crate) fn collect_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut collected: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_TYPE, SET_COOKIE};

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());

        let response = RawResponse::from_parts(&headers, Bytes::from_static(b"ok"), 200);

        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header_values("CONTENT-TYPE"), ["text/plain"]);
        assert!(response.header("x-missing").is_none());
        assert!(response.header_values("x-missing").is_empty());
    }

    #[test]
    fn test_repeated_headers_keep_order() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, "a=1".parse().unwrap());
        headers.append(SET_COOKIE, "b=2".parse().unwrap());

        let response = RawResponse::from_parts(&headers, Bytes::new(), 204);

        assert_eq!(response.header_values("Set-Cookie"), ["a=1", "b=2"]);
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_text_and_json() {
        let body = r#"{"name":"file.txt","size":12}"#;
        let response = RawResponse::new(HashMap::new(), body, 200).unwrap();

        #[derive(serde::Deserialize)]
        struct Metadata {
            name: String,
            size: u64,
        }

        let metadata: Metadata = response.json().expect("valid JSON");
        assert_eq!(metadata.name, "file.txt");
        assert_eq!(metadata.size, 12);
        assert!(response.text().unwrap().starts_with('{'));
        assert!(response.is_success());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let response = RawResponse::new(HashMap::new(), "not json", 200).unwrap();
        assert!(matches!(
            response.json::<serde_json::Value>(),
            Err(ClientError::Serialization(_))
        ));
    }

    #[test]
    fn test_new_lowercases_and_merges_header_names() {
        let headers = vec![
            ("Content-Type".to_string(), vec!["text/plain".to_string()]),
            ("X-Trace".to_string(), vec!["a".to_string()]),
            ("x-trace".to_string(), vec!["b".to_string()]),
        ];

        let response = RawResponse::new(headers, "ok", 200).unwrap();

        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header_values("x-trace"), ["a", "b"]);
        assert!(response.headers().keys().all(|name| name == &name.to_ascii_lowercase()));
    }

    #[test]
    fn test_new_rejects_failing_status() {
        for status in [400, 404, 500, 599] {
            let result = RawResponse::new(HashMap::new(), "boom", status);
            assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
        }
        assert!(RawResponse::new(HashMap::new(), "", 399).is_ok());
    }
}
