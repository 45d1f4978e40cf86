//! Pagination types
//!
//! Wire envelope for list endpoints and the stop conditions derived from it.

use serde::{Deserialize, Deserializer, Serialize};

/// JSON envelope returned by every list endpoint
///
/// ```json
/// {"data": [...], "page": 1, "perPage": 25, "total": 80, "totalPages": 4,
///  "meta": {"requestId": "req_123"}}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageEnvelope<T> {
    /// Records on this page; a missing or `null` list is empty
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    /// 1-indexed page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size
    #[serde(default)]
    pub per_page: u32,
    /// Total records across all pages
    #[serde(default)]
    pub total: u64,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: u32,
    /// Per-response metadata
    #[serde(default)]
    pub meta: EnvelopeMeta,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `meta` object of the envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMeta {
    /// Correlation id assigned by the server
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Passthrough metadata kept alongside a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Correlation id (body `meta.requestId`, else `x-request-id` header)
    pub request_id: Option<String>,
    /// HTTP status of the response
    pub status: u16,
}

/// Why a page is the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page has no records
    EmptyPage,
    /// The page number reached the reported page count
    LastPage,
}

/// Decide whether a page is terminal.
///
/// Either signal is sufficient. The empty check wins when both apply.
pub fn check_stop_condition(item_count: usize, page: u32, total_pages: u32) -> Option<StopReason> {
    if item_count == 0 {
        Some(StopReason::EmptyPage)
    } else if page >= total_pages {
        Some(StopReason::LastPage)
    } else {
        None
    }
}
