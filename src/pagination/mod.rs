//! Pagination module
//!
//! Generic traversal of server-paged collections.
//!
//! # Overview
//!
//! A [`PageFetcher`] retrieves one page for a [`PageRequest`]. A
//! [`PageIterator`] starts from a page the caller already holds, hands every
//! record to a visitor, and follows continuation tokens until the visitor
//! stops it or no token remains.
//!
//! ```rust,ignore
//! let fetcher = HttpPageFetcher::new(&client);
//! let request = PageRequest::new("users").with_page_size(100);
//! let first = PageFetcher::<User>::fetch(&fetcher, &request).await?;
//!
//! let mut iter = PageIterator::without_preparer(&fetcher, request, first, |user: &User| {
//!     println!("{}", user.display_name.as_deref().unwrap_or_default());
//!     Ok(true)
//! });
//! iter.iterate().await?;
//! ```

mod fetcher;
mod iterator;
mod types;

pub use fetcher::{
    extract_records, extract_string, lookup_path, parse_link_header, ContinuationStyle,
    HttpPageFetcher, PageFetcher, ODATA_NEXT_LINK_PATH, ODATA_TOP_PARAM, ODATA_VALUE_PATH,
};
pub use iterator::{identity_preparer, IdentityPreparer, PageIterator};
pub use types::{
    ContinuationToken, Page, PageRequest, TraversalOutcome, TraversalState, TraversalStats,
};
