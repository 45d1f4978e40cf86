//! A single fetched page
//!
//! A `Page` owns the records of one list response, the pagination counters
//! reported by the server, and the request that produced it. The request is
//! what lets a page fetch its successor: same endpoint, same filters, same
//! page size, page number plus one.

use super::types::{check_stop_condition, PageEnvelope, ResponseMeta, StopReason};
use crate::error::Result;
use crate::http::{RawResponse, RequestConfig, RequestExecutor};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// One page of a list endpoint
pub struct Page<T> {
    items: Vec<T>,
    page_number: u32,
    per_page: u32,
    total_items: u64,
    total_pages: u32,
    meta: ResponseMeta,
    request: RequestConfig,
    executor: Arc<dyn RequestExecutor>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Execute `request` once and decode the result into a page
    pub async fn fetch(executor: Arc<dyn RequestExecutor>, request: RequestConfig) -> Result<Self> {
        let response = executor.execute(&request).await?;
        Self::from_response(response, request, executor)
    }

    /// Build a page from a response and the request that produced it.
    ///
    /// When the envelope omits `page`, the page number requested by
    /// `request` is used, then 1.
    pub fn from_response(
        response: RawResponse,
        request: RequestConfig,
        executor: Arc<dyn RequestExecutor>,
    ) -> Result<Self> {
        let request_id_header = response.request_id().map(str::to_string);
        let envelope: PageEnvelope<T> = serde_json::from_value(response.body)?;

        let page_number = envelope
            .page
            .or_else(|| request.page())
            .unwrap_or(1)
            .max(1);

        Ok(Self {
            items: envelope.data,
            page_number,
            per_page: envelope.per_page,
            total_items: envelope.total,
            total_pages: envelope.total_pages,
            meta: ResponseMeta {
                request_id: envelope.meta.request_id.or(request_id_header),
                status: response.status,
            },
            request,
            executor,
        })
    }

    /// Fetch the page after this one.
    ///
    /// Returns `Ok(None)` without issuing a request when this page is
    /// terminal (see [`Page::stop_reason`]). Otherwise performs exactly one
    /// request for `page_number + 1`, keeping every other query parameter.
    /// Errors from the executor are returned unchanged.
    pub async fn fetch_next_page(&self) -> Result<Option<Self>> {
        if let Some(reason) = self.stop_reason() {
            debug!(
                page = self.page_number,
                total_pages = self.total_pages,
                ?reason,
                "No further pages"
            );
            return Ok(None);
        }

        let next_request = self.request.with_page(self.page_number + 1);
        debug!(
            path = %next_request.path,
            page = self.page_number + 1,
            "Fetching next page"
        );

        let page = Self::fetch(Arc::clone(&self.executor), next_request).await?;
        Ok(Some(page))
    }
}

impl<T> Page<T> {
    /// Records on this page, in server order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only its records
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-indexed page number
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Page size reported by the server
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total records reported by the server at fetch time
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total pages reported by the server at fetch time
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Response metadata
    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// Request that produced this page
    pub fn request(&self) -> &RequestConfig {
        &self.request
    }

    /// Why this page is the last one, if it is
    pub fn stop_reason(&self) -> Option<StopReason> {
        check_stop_condition(self.items.len(), self.page_number, self.total_pages)
    }

    /// Whether no further page will be fetched after this one
    pub fn is_terminal(&self) -> bool {
        self.stop_reason().is_some()
    }

    /// Whether another page may follow
    pub fn has_next(&self) -> bool {
        !self.is_terminal()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("items", &self.items)
            .field("page_number", &self.page_number)
            .field("per_page", &self.per_page)
            .field("total_items", &self.total_items)
            .field("total_pages", &self.total_pages)
            .field("meta", &self.meta)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
