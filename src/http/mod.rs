//! HTTP module
//!
//! Request descriptors, the execution seam used by pagination, and the
//! reqwest-backed client that implements it.
//!
//! # Features
//!
//! - **Request Descriptors**: `RequestConfig` values derived by cloning
//! - **Executor Trait**: `RequestExecutor` decouples paging from transport
//! - **HTTP Client**: base URL joining, API key auth, per-request timeouts

mod client;
mod executor;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use executor::{RawResponse, RequestExecutor, REQUEST_ID_HEADER};
pub use request::{RequestConfig, PAGE_PARAM, PER_PAGE_PARAM};

#[cfg(test)]
mod tests;
