//! Page fetchers
//!
//! A [`PageFetcher`] turns one [`PageRequest`] into one [`Page`]. The HTTP
//! implementation covers the continuation styles seen across REST APIs:
//!
//! - **Next link**: absolute URL in the body (`@odata.nextLink`)
//! - **Query param**: opaque cursor in the body, sent back as a query parameter
//! - **Link header**: RFC 8288 `Link: <url>; rel="next"`

use super::types::{ContinuationToken, Page, PageRequest};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::OptionStringExt;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Default record location in a Graph collection response
pub const ODATA_VALUE_PATH: &str = "value";

/// Default continuation location in a Graph collection response
pub const ODATA_NEXT_LINK_PATH: &str = "@odata.nextLink";

/// Default Graph page size parameter
pub const ODATA_TOP_PARAM: &str = "$top";

/// Retrieves a single page of records
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the page described by `request`
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>>;
}

/// How the server hands out the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuationStyle {
    /// Absolute URL found at `path` in the body
    NextLink {
        /// Dotted path to the URL
        path: String,
    },
    /// Cursor found at `path` in the body, sent back as `param`
    QueryParam {
        /// Query parameter carrying the cursor
        param: String,
        /// Dotted path to the cursor
        path: String,
    },
    /// Absolute URL in the `Link` response header
    LinkHeader {
        /// Relation to follow
        rel: String,
    },
}

impl Default for ContinuationStyle {
    fn default() -> Self {
        Self::odata()
    }
}

impl ContinuationStyle {
    /// Graph `@odata.nextLink`
    pub fn odata() -> Self {
        Self::NextLink {
            path: ODATA_NEXT_LINK_PATH.to_string(),
        }
    }

    /// Body cursor echoed back as a query parameter
    pub fn cursor(param: impl Into<String>, path: impl Into<String>) -> Self {
        Self::QueryParam {
            param: param.into(),
            path: path.into(),
        }
    }

    /// `Link` header relation
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Check if continuation tokens are complete URLs
    fn token_is_url(&self) -> bool {
        !matches!(self, Self::QueryParam { .. })
    }
}

/// Fetches pages of `T` over HTTP
///
/// Defaults match Graph collections: records under `value`, continuation in
/// `@odata.nextLink`, page size sent as `$top`.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher<'c> {
    client: &'c HttpClient,
    records_path: Option<String>,
    style: ContinuationStyle,
    page_size_param: String,
}

impl<'c> HttpPageFetcher<'c> {
    /// Create a fetcher with Graph defaults
    pub fn new(client: &'c HttpClient) -> Self {
        Self {
            client,
            records_path: Some(ODATA_VALUE_PATH.to_string()),
            style: ContinuationStyle::odata(),
            page_size_param: ODATA_TOP_PARAM.to_string(),
        }
    }

    /// Read records from `path` in the body
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    /// Read records from the body root, which must be an array
    #[must_use]
    pub fn with_root_records(mut self) -> Self {
        self.records_path = None;
        self
    }

    /// Set the continuation style
    #[must_use]
    pub fn with_style(mut self, style: ContinuationStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the query parameter used for the page size
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = param.into();
        self
    }

    /// Resolve a request into a URL and request options
    pub(crate) fn build(&self, request: &PageRequest) -> Result<(String, RequestConfig)> {
        let mut config = RequestConfig::new();
        for (key, value) in &request.headers {
            config = config.header(key, value);
        }

        match &request.continuation {
            // Next links already carry the original query, page size included
            Some(token) if self.style.token_is_url() => {
                url::Url::parse(token.as_str())?;
                Ok((token.as_str().to_string(), config))
            }
            continuation => {
                for (key, value) in &request.query {
                    config = config.query(key, value);
                }
                if let Some(size) = request.page_size {
                    config = config.query(&self.page_size_param, size.to_string());
                }
                if let (Some(token), ContinuationStyle::QueryParam { param, .. }) =
                    (continuation, &self.style)
                {
                    config = config.query(param, token.as_str());
                }
                Ok((request.path.clone(), config))
            }
        }
    }

    fn next_token(&self, body: &Value, link_header: Option<&str>) -> Option<ContinuationToken> {
        let raw = match &self.style {
            ContinuationStyle::NextLink { path } | ContinuationStyle::QueryParam { path, .. } => {
                extract_string(body, path)
            }
            ContinuationStyle::LinkHeader { rel } => {
                link_header.and_then(|header| parse_link_header(header, rel))
            }
        };
        raw.none_if_empty().map(ContinuationToken::new)
    }
}

#[async_trait]
impl<'c, T> PageFetcher<T> for HttpPageFetcher<'c>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>> {
        let (url, config) = self.build(request)?;
        let response = self.client.get_with_config(&url, config).await?;

        let link_header = response
            .headers()
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("Failed to parse page body: {e}")))?;

        let records = extract_records(&body, self.records_path.as_deref())?;
        let items = records
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| Error::decode(format!("Failed to decode record: {e}")))?;

        let next = self.next_token(&body, link_header.as_deref());
        debug!(
            url = %url,
            records = items.len(),
            has_next = next.is_some(),
            "Fetched page"
        );

        Ok(Page::new(items, next))
    }
}

/// Look up a dotted path, preferring an exact key match
///
/// Graph keys such as `@odata.nextLink` contain dots, so the whole path is
/// tried as a single key before it is split.
pub fn lookup_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    if let Some(found) = value.as_object().and_then(|map| map.get(path)) {
        return Some(found);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }
    Some(current)
}

/// Extract a scalar at `path` as a string
pub fn extract_string(value: &Value, path: &str) -> Option<String> {
    match lookup_path(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Pull the record array out of a page body
pub fn extract_records(body: &Value, path: Option<&str>) -> Result<Vec<Value>> {
    let target = match path {
        Some(path) => lookup_path(body, path)
            .ok_or_else(|| Error::decode(format!("Response has no records at '{path}'")))?,
        None => body,
    };

    match target {
        Value::Array(items) => Ok(items.clone()),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::decode(format!(
            "Expected an array of records, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Find the URL for `target_rel` in a `Link` header
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in part.trim().split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rel = Some(value.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r.split_whitespace().any(|r| r == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}
