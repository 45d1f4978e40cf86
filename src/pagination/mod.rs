//! Pagination module
//!
//! Page-number pagination for list endpoints.
//!
//! # Overview
//!
//! - [`Page`] holds one decoded page and fetches its successor on demand,
//!   reusing the original request with only the page number advanced.
//! - [`AutoPager`] flattens the page chain into one lazy record sequence,
//!   with a sticky error for failed fetches.
//!
//! A page is terminal when it is empty or when its page number has reached
//! the reported page count; either signal stops pagination.

mod page;
mod pager;
mod types;

pub use page::Page;
pub use pager::AutoPager;
pub use types::{check_stop_condition, EnvelopeMeta, PageEnvelope, ResponseMeta, StopReason};
