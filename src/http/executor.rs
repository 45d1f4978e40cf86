//! Request execution seam
//!
//! Pagination never talks to the network directly. It hands a
//! `RequestConfig` to a `RequestExecutor` and decodes whatever comes back.

use super::request::RequestConfig;
use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;

/// Header used by the API to echo a request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A response after one HTTP round trip, body already parsed as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercased names)
    pub headers: StringMap,
    /// Response body (`Null` when empty)
    pub body: JsonValue,
}

impl RawResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            headers: StringMap::new(),
            body,
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Correlation id echoed in the response headers
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }
}

/// Performs a single request.
///
/// Implementations must not retry on their own; a failure is returned to the
/// caller as is.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute the request and return the decoded response
    async fn execute(&self, request: &RequestConfig) -> Result<RawResponse>;
}
