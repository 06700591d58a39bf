//! Pagination types
//!
//! The page/continuation contract shared by fetchers and the iterator.

use crate::types::StringMap;
use std::fmt;

/// Opaque server-issued cursor for the next page
///
/// For Graph this is the `@odata.nextLink` URL. The traversal engine only
/// moves it from one page into the next request; it never builds or edits one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a server-issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One batch of records from a listing call
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in server order
    pub items: Vec<T>,
    /// Present when more pages exist
    pub next: Option<ContinuationToken>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next: Option<ContinuationToken>) -> Self {
        Self { items, next }
    }

    /// A page with more pages behind it
    pub fn with_next(items: Vec<T>, next: impl Into<String>) -> Self {
        Self::new(items, Some(ContinuationToken::new(next)))
    }

    /// The final page of a collection
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page carries no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if another page follows
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

/// Everything needed to reproduce or continue one listing call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Collection path, relative to the client's base URL
    pub path: String,
    /// Base query parameters (`$select`, `$filter`, ...)
    pub query: StringMap,
    /// Extra request headers
    pub headers: StringMap,
    /// Requested page size
    pub page_size: Option<u32>,
    /// Cursor of the page to fetch; `None` for the first page
    pub continuation: Option<ContinuationToken>,
}

impl PageRequest {
    /// Create a first-page request for a collection path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Request for the page behind `token`, keeping everything else
    #[must_use]
    pub fn continue_with(&self, token: ContinuationToken) -> Self {
        Self {
            continuation: Some(token),
            ..self.clone()
        }
    }

    /// Check if this request continues an earlier one
    pub fn is_continuation(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Where a traversal currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// A page is loaded and about to be visited
    Ready,
    /// Records of the current page are being visited
    Visiting,
    /// Preparer and fetch for the next page are in flight
    AwaitingNextPage,
    /// The visitor asked to stop
    StoppedEarly,
    /// The last page has been visited
    Exhausted,
    /// A fetch or callback failed
    Failed,
}

impl TraversalState {
    /// Check if no further progress is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::StoppedEarly | Self::Exhausted | Self::Failed)
    }
}

/// How a successful traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOutcome {
    /// The visitor returned `false`
    StoppedEarly,
    /// Every record of every page was visited
    Exhausted,
}

impl TraversalOutcome {
    /// Check if the whole collection was visited
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Check if the visitor cut the traversal short
    pub fn is_stopped_early(&self) -> bool {
        matches!(self, Self::StoppedEarly)
    }
}

/// Progress counters for one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Pages loaded, including the initial page
    pub pages: usize,
    /// Visitor invocations
    pub records_visited: usize,
}
