// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # B2C Directory
//!
//! Manage Azure AD B2C users through Microsoft Graph, with a generic engine
//! for walking server-paged collections.
//!
//! ## Features
//!
//! - **Page Traversal**: Visit every record of a paged collection in order, with early stop
//! - **Graph Users**: List, count, look up, create, delete and reset passwords
//! - **Custom Attributes**: B2C extension attribute naming and projection
//! - **Bulk Import**: Create users from a JSON file, continuing past failures
//! - **Resilient HTTP**: Retry, backoff, rate limiting and OAuth2 client credentials
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use b2c_directory::{config::Settings, directory::{DirectoryClient, UserQuery}, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::from_file("appsettings.json")?;
//!     let client = DirectoryClient::from_settings(&settings)?;
//!
//!     let (outcome, stats) = client
//!         .traverse_users(
//!             &UserQuery::short(),
//!             |user| {
//!                 println!("{}", user.label());
//!                 Ok(true)
//!             },
//!             |request| Ok(request),
//!         )
//!         .await?;
//!
//!     println!("{outcome:?} after {} users", stats.records_visited);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI (clap)                             │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │              DirectoryClient (Graph users)                  │
//! └───────────────┬─────────────────────────────┬───────────────┘
//!                 │                             │
//! ┌───────────────┴───────────────┐ ┌───────────┴───────────────┐
//! │ Pagination                    │ │ HTTP                      │
//! │ PageIterator ← PageFetcher    │→│ Retry / Rate limit / Auth │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Paged collection traversal
pub mod pagination;

/// Graph user operations for B2C tenants
pub mod directory;

/// Application settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use directory::{DirectoryClient, User, UserQuery};
pub use pagination::{Page, PageFetcher, PageIterator, PageRequest, TraversalOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
