//! Page iterator
//!
//! Drives a [`PageFetcher`] across a collection, one record at a time.

use super::fetcher::PageFetcher;
use super::types::{Page, PageRequest, TraversalOutcome, TraversalState, TraversalStats};
use crate::error::{Error, Result};
use std::marker::PhantomData;
use tracing::debug;

/// Preparer that issues the continuation request unchanged
pub fn identity_preparer(request: PageRequest) -> Result<PageRequest> {
    Ok(request)
}

/// Function type of [`identity_preparer`]
pub type IdentityPreparer = fn(PageRequest) -> Result<PageRequest>;

/// Walks a paged collection starting from an already-fetched page
///
/// The visitor sees every record in server order and returns `Ok(false)` to
/// stop immediately. The preparer sees each continuation request before it is
/// sent and returns the request to issue; it is never called for the initial
/// page. Continuations are built from the last request actually issued, so
/// overrides made by the preparer carry forward.
pub struct PageIterator<'a, T, F: ?Sized, V, P> {
    fetcher: &'a F,
    request: PageRequest,
    page: Option<Page<T>>,
    pending: Option<PageRequest>,
    visitor: V,
    preparer: P,
    state: TraversalState,
    stats: TraversalStats,
    _record: PhantomData<fn(&T)>,
}

impl<'a, T, F, V> PageIterator<'a, T, F, V, IdentityPreparer>
where
    F: PageFetcher<T> + ?Sized,
    V: FnMut(&T) -> Result<bool>,
{
    /// Create an iterator whose continuation requests are sent unchanged
    pub fn without_preparer(
        fetcher: &'a F,
        request: PageRequest,
        initial_page: Page<T>,
        visitor: V,
    ) -> Self {
        Self::new(fetcher, request, initial_page, visitor, identity_preparer)
    }
}

impl<'a, T, F, V, P> PageIterator<'a, T, F, V, P>
where
    F: PageFetcher<T> + ?Sized,
    V: FnMut(&T) -> Result<bool>,
    P: FnMut(PageRequest) -> Result<PageRequest>,
{
    /// Create an iterator
    ///
    /// `request` is the request that produced `initial_page`.
    pub fn new(
        fetcher: &'a F,
        request: PageRequest,
        initial_page: Page<T>,
        visitor: V,
        preparer: P,
    ) -> Self {
        Self {
            fetcher,
            request,
            page: Some(initial_page),
            pending: None,
            visitor,
            preparer,
            state: TraversalState::Ready,
            stats: TraversalStats {
                pages: 1,
                records_visited: 0,
            },
            _record: PhantomData,
        }
    }

    /// Current state of the traversal
    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// Progress so far
    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// The continuation request in flight, or the one whose fetch failed
    pub fn pending_request(&self) -> Option<&PageRequest> {
        self.pending.as_ref()
    }

    /// Run the traversal until the visitor stops it or the collection ends
    ///
    /// Fetch, visitor and preparer errors are returned as-is and leave the
    /// iterator in [`TraversalState::Failed`]. Records visited before the
    /// failure stay visited. Calling this again on a finished iterator does
    /// not touch the callbacks or the fetcher.
    pub async fn iterate(&mut self) -> Result<TraversalOutcome> {
        match self.state {
            TraversalState::StoppedEarly => return Ok(TraversalOutcome::StoppedEarly),
            TraversalState::Exhausted => return Ok(TraversalOutcome::Exhausted),
            TraversalState::Failed => return Err(Error::TraversalFailed),
            // A previous call was dropped while waiting on the fetch
            TraversalState::AwaitingNextPage => self.fetch_pending().await?,
            TraversalState::Ready | TraversalState::Visiting => {}
        }

        loop {
            let Some(page) = self.page.take() else {
                self.state = TraversalState::Failed;
                return Err(Error::TraversalFailed);
            };

            self.state = TraversalState::Visiting;
            let Page { items, next } = page;

            for item in &items {
                self.stats.records_visited += 1;
                match (self.visitor)(item) {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!(
                            page = self.stats.pages,
                            records = self.stats.records_visited,
                            "Traversal stopped by visitor"
                        );
                        self.state = TraversalState::StoppedEarly;
                        return Ok(TraversalOutcome::StoppedEarly);
                    }
                    Err(e) => {
                        self.state = TraversalState::Failed;
                        return Err(e);
                    }
                }
            }

            let Some(token) = next else {
                debug!(
                    pages = self.stats.pages,
                    records = self.stats.records_visited,
                    "Traversal exhausted"
                );
                self.state = TraversalState::Exhausted;
                return Ok(TraversalOutcome::Exhausted);
            };

            self.state = TraversalState::AwaitingNextPage;
            let next_request = match (self.preparer)(self.request.continue_with(token)) {
                Ok(request) => request,
                Err(e) => {
                    self.state = TraversalState::Failed;
                    return Err(e);
                }
            };
            self.pending = Some(next_request);
            self.fetch_pending().await?;
        }
    }

    /// Fetch the pending request and make its page current
    async fn fetch_pending(&mut self) -> Result<()> {
        let Some(request) = self.pending.as_ref() else {
            self.state = TraversalState::Failed;
            return Err(Error::TraversalFailed);
        };

        debug!(page = self.stats.pages + 1, "Fetching next page");
        match self.fetcher.fetch(request).await {
            Ok(page) => {
                if let Some(request) = self.pending.take() {
                    self.request = request;
                }
                self.stats.pages += 1;
                self.page = Some(page);
                self.state = TraversalState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = TraversalState::Failed;
                Err(e)
            }
        }
    }
}

impl<T, F: ?Sized, V, P> std::fmt::Debug for PageIterator<'_, T, F, V, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("request", &self.request)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
