//! Request descriptors
//!
//! A `RequestConfig` captures everything needed to issue one API call:
//! method, path, query parameters, headers and body. Descriptors are plain
//! values. Deriving a follow-up request (for example the next page) clones
//! the descriptor and changes the copy, so the original stays reusable.

use crate::types::{JsonValue, Method};
use std::collections::BTreeMap;
use std::time::Duration;

/// Query parameter carrying the 1-indexed page number
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const PER_PAGE_PARAM: &str = "perPage";

/// Configuration for a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    /// HTTP method
    pub method: Method,
    /// Path relative to the client's base URL, or an absolute URL
    pub path: String,
    /// Query parameters
    pub query: BTreeMap<String, String>,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a request for the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Add or replace a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Derive a new descriptor with one query parameter set.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_query(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.clone().query(key, value)
    }

    /// Derive a new descriptor targeting the given page number
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        self.with_query(PAGE_PARAM, page.to_string())
    }

    /// Look up a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Page number requested by this descriptor, if any
    pub fn page(&self) -> Option<u32> {
        self.query_param(PAGE_PARAM).and_then(|p| p.parse().ok())
    }
}
