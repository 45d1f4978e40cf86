//! # mailapi-client
//!
//! Async client for a transactional-email REST API (tenants, domains,
//! emails, webhooks, suppression lists, usage, logs).
//!
//! ## Features
//!
//! - **Page-number pagination**: every list call returns a [`Page`] that can
//!   fetch its successor, or an [`AutoPager`] that hides page boundaries
//! - **Pluggable transport**: pagination talks to a [`RequestExecutor`];
//!   [`HttpClient`] is the `reqwest` implementation
//! - **Configuration**: YAML/JSON files or `MAILAPI_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mailapi_client::{ApiClient, ClientConfig, ListParams, Resource, Result};
//!
//! #[derive(serde::Deserialize, Clone)]
//! struct Suppression {
//!     email: String,
//!     reason: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::new(&ClientConfig::from_env()?)?;
//!
//!     let mut pager = client
//!         .list_resource::<Suppression>(Resource::Suppressions, &ListParams::new().per_page(100))
//!         .await;
//!
//!     while pager.advance().await {
//!         if let Some(s) = pager.current() {
//!             println!("{}: {} ({})", pager.yield_count(), s.email, s.reason);
//!         }
//!     }
//!
//!     if let Some(err) = pager.last_error() {
//!         eprintln!("stopped early: {err}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ApiClient ──list()──► Page::fetch ──► RequestExecutor (HttpClient)
//!                           │
//!                           └──► AutoPager ──advance()──► Page::fetch_next_page
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request descriptors, executor trait and HTTP client
pub mod http;

/// Page-number pagination
pub mod pagination;

/// List operations over the API
pub mod client;

/// Client configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{ApiClient, ListParams, Resource};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, RawResponse, RequestConfig, RequestExecutor};
pub use pagination::{AutoPager, Page, StopReason};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
