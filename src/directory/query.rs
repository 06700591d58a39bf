//! User listing queries

use crate::pagination::PageRequest;

/// Graph collection path for users
pub const USERS_PATH: &str = "users";

/// Properties exported by a full listing
pub const FULL_SELECT: &[&str] = &[
    "displayName",
    "id",
    "identities",
    "accountEnabled",
    "createdDateTime",
    "givenName",
    "mail",
    "otherMails",
    "userPrincipalName",
    "userType",
    "city",
    "companyName",
    "country",
    "department",
    "employeeHireDate",
    "employeeId",
    "passwordPolicies",
    "postalCode",
    "state",
    "streetAddress",
    "surname",
];

/// Properties needed to identify a user
pub const SHORT_SELECT: &[&str] = &["id", "displayName", "identities"];

/// `$select` / `$filter` / `$top` for a user listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Properties to return; server default when empty
    pub select: Vec<String>,
    /// OData filter expression
    pub filter: Option<String>,
    /// Requested page size
    pub page_size: Option<u32>,
}

impl UserQuery {
    /// Query with no projection or filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Query returning the full export property set
    pub fn full() -> Self {
        Self::new().select(FULL_SELECT.iter().copied())
    }

    /// Query returning id, display name and identities
    pub fn short() -> Self {
        Self::new().select(SHORT_SELECT.iter().copied())
    }

    /// Add properties to `$select`
    #[must_use]
    pub fn select<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(properties.into_iter().map(Into::into));
        self
    }

    /// Set `$filter`
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set `$top`
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Comma-joined `$select` value
    pub fn select_clause(&self) -> Option<String> {
        (!self.select.is_empty()).then(|| self.select.join(","))
    }

    /// First-page request for this query
    pub fn to_request(&self) -> PageRequest {
        let mut request = PageRequest::new(USERS_PATH);
        if let Some(select) = self.select_clause() {
            request = request.with_query("$select", select);
        }
        if let Some(filter) = &self.filter {
            request = request.with_query("$filter", filter);
        }
        if let Some(size) = self.page_size {
            request = request.with_page_size(size);
        }
        request
    }
}

/// Escape a value for use inside a single-quoted OData string literal
pub fn escape_odata_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Filter matching a local account by sign-in name
pub fn sign_in_name_filter(sign_in_name: &str, tenant: &str) -> String {
    format!(
        "identities/any(c:c/issuerAssignedId eq '{}' and c/issuer eq '{}')",
        escape_odata_string(sign_in_name),
        escape_odata_string(tenant)
    )
}
