//! Auto-advancing item cursor
//!
//! `AutoPager` turns a chain of pages into one forward-only sequence of
//! records. It never issues the first request itself: it is seeded with the
//! outcome of the initial fetch and only fetches again when the records of
//! the current page have all been handed out.

use super::page::Page;
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

enum PagerState<T> {
    Ready(Page<T>),
    Exhausted,
}

/// Flattens successive pages into a lazy item sequence.
///
/// ```rust,ignore
/// let mut pager = client.list::<Domain>("/domains", &ListParams::new()).await;
/// while pager.advance().await {
///     let domain = pager.current().unwrap();
///     println!("{} {}", pager.yield_count(), domain.name);
/// }
/// if let Some(err) = pager.last_error() {
///     eprintln!("listing stopped early: {err}");
/// }
/// ```
pub struct AutoPager<T> {
    state: PagerState<T>,
    index: usize,
    yielded: u64,
    last_error: Option<Error>,
}

impl<T: DeserializeOwned> AutoPager<T> {
    /// Wrap the outcome of the initial page fetch
    pub fn new(initial: Result<Page<T>>) -> Self {
        let (state, last_error) = match initial {
            Ok(page) if page.is_empty() => (PagerState::Exhausted, None),
            Ok(page) => (PagerState::Ready(page), None),
            Err(e) => {
                warn!("Initial page fetch failed: {e}");
                (PagerState::Exhausted, Some(e))
            }
        };

        Self {
            state,
            index: 0,
            yielded: 0,
            last_error,
        }
    }

    /// Move to the next record, fetching the next page when needed.
    ///
    /// Returns `false` once the sequence is exhausted, either normally or
    /// because a fetch failed (see [`AutoPager::last_error`]). After the
    /// first `false` every call returns `false` without fetching.
    pub async fn advance(&mut self) -> bool {
        loop {
            let page = match &self.state {
                PagerState::Ready(page) => page,
                PagerState::Exhausted => return false,
            };

            if self.index < page.len() {
                self.index += 1;
                self.yielded += 1;
                return true;
            }

            let next = page.fetch_next_page().await;
            match next {
                Ok(Some(next)) if !next.is_empty() => {
                    self.state = PagerState::Ready(next);
                    self.index = 0;
                }
                Ok(_) => {
                    debug!(yielded = self.yielded, "Pagination exhausted");
                    self.state = PagerState::Exhausted;
                    return false;
                }
                Err(e) => {
                    warn!(yielded = self.yielded, "Next page fetch failed: {e}");
                    self.last_error = Some(e);
                    self.state = PagerState::Exhausted;
                    return false;
                }
            }
        }
    }

    /// Turn the pager into a stream of records.
    ///
    /// A failed fetch is yielded once as `Err` and ends the stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>>
    where
        T: Clone,
    {
        stream::unfold(Some(self), |pager| async move {
            let mut pager = pager?;
            if pager.advance().await {
                let item = pager.current().cloned()?;
                Some((Ok(item), Some(pager)))
            } else {
                pager.last_error.take().map(|e| (Err(e), None))
            }
        })
    }

    /// Drain every remaining record.
    ///
    /// Returns the terminal error instead if a fetch fails.
    pub async fn collect_all(mut self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let mut items = Vec::new();
        while self.advance().await {
            if let Some(item) = self.current() {
                items.push(item.clone());
            }
        }

        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(items),
        }
    }
}

impl<T> AutoPager<T> {
    /// Record made current by the last successful [`AutoPager::advance`].
    ///
    /// `None` before the first advance and once the pager is exhausted.
    pub fn current(&self) -> Option<&T> {
        match &self.state {
            PagerState::Ready(page) => self
                .index
                .checked_sub(1)
                .and_then(|i| page.items().get(i)),
            PagerState::Exhausted => None,
        }
    }

    /// Error that ended iteration, if any
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Number of records yielded so far
    pub fn yield_count(&self) -> u64 {
        self.yielded
    }

    /// Whether no further records can be produced
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, PagerState::Exhausted)
    }

    /// Page currently being read, if any
    pub fn current_page(&self) -> Option<&Page<T>> {
        match &self.state {
            PagerState::Ready(page) => Some(page),
            PagerState::Exhausted => None,
        }
    }
}

impl<T> std::fmt::Debug for AutoPager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoPager")
            .field(
                "page_number",
                &self.current_page().map(Page::page_number),
            )
            .field("index", &self.index)
            .field("yielded", &self.yielded)
            .field("last_error", &self.last_error)
            .finish()
    }
}
