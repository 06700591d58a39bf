//! Authentication module
//!
//! Supports: Bearer, OAuth2 client credentials
//!
//! The `Authenticator` caches client credentials tokens until they are
//! within 30 seconds of expiry.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, GRAPH_DEFAULT_SCOPE};
