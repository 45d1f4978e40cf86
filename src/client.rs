//! API client facade
//!
//! List operations for the mail API. Each call performs the initial page
//! fetch itself, then hands the result to a [`Page`] or an [`AutoPager`]
//! for the rest of the walk.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig, RequestExecutor, PAGE_PARAM, PER_PAGE_PARAM};
use crate::pagination::{AutoPager, Page};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tenants,
    Domains,
    Emails,
    Webhooks,
    Suppressions,
    Logs,
}

impl Resource {
    /// Collection path relative to the base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::Tenants => "/tenants",
            Resource::Domains => "/domains",
            Resource::Emails => "/emails",
            Resource::Webhooks => "/webhooks",
            Resource::Suppressions => "/suppressions",
            Resource::Logs => "/logs",
        }
    }
}

/// Parameters for a list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// First page to fetch (1-indexed)
    pub page: Option<u32>,
    /// Page size
    pub per_page: Option<u32>,
    /// Filters and sort options, sent as query parameters
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    /// Empty parameters: server defaults for page and page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at the given page
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Request a page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Add a filter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Client for the mail API
#[derive(Clone)]
pub struct ApiClient {
    executor: Arc<dyn RequestExecutor>,
    default_per_page: Option<u32>,
}

impl ApiClient {
    /// Create a client backed by `reqwest`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.http_config())?;
        Ok(Self {
            executor: Arc::new(http),
            default_per_page: config.per_page,
        })
    }

    /// Create a client over any executor
    pub fn with_executor(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            executor,
            default_per_page: None,
        }
    }

    /// Set the page size used when `ListParams` leaves it unset
    #[must_use]
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = Some(per_page);
        self
    }

    /// Executor shared by every page fetched through this client
    pub fn executor(&self) -> &Arc<dyn RequestExecutor> {
        &self.executor
    }

    /// Build the request for the first page of a list call
    pub fn list_request(&self, path: &str, params: &ListParams) -> RequestConfig {
        let mut request = RequestConfig::get(path);

        for (key, value) in &params.filters {
            request = request.query(key, value);
        }

        if let Some(page) = params.page {
            request = request.query(PAGE_PARAM, page.to_string());
        }

        if let Some(per_page) = params.per_page.or(self.default_per_page) {
            request = request.query(PER_PAGE_PARAM, per_page.to_string());
        }

        request
    }

    /// Fetch one page for manual pagination
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<Page<T>> {
        let request = self.list_request(path, params);
        debug!(path, page = ?params.page, "Listing");
        Page::fetch(Arc::clone(&self.executor), request).await
    }

    /// Fetch the first page and wrap it in an auto-advancing pager.
    ///
    /// A failed first fetch is not returned here; it becomes the pager's
    /// [`AutoPager::last_error`].
    pub async fn list<T: DeserializeOwned>(&self, path: &str, params: &ListParams) -> AutoPager<T> {
        AutoPager::new(self.list_page(path, params).await)
    }

    /// [`ApiClient::list`] for a known collection
    pub async fn list_resource<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &ListParams,
    ) -> AutoPager<T> {
        self.list(resource.path(), params).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("default_per_page", &self.default_per_page)
            .finish_non_exhaustive()
    }
}
