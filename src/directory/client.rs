//! Directory client
//!
//! User operations on a B2C tenant through Microsoft Graph. Listings are
//! driven by the pagination engine; single-object calls go straight to the
//! HTTP client.

use super::extensions::CustomAttributeHelper;
use super::import::ImportedUser;
use super::query::{sign_in_name_filter, UserQuery, SHORT_SELECT, USERS_PATH};
use super::types::{BulkCreateFailure, BulkCreateReport, PasswordProfile, User, B2C_PASSWORD_POLICIES};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{
    HttpPageFetcher, Page, PageFetcher, PageIterator, PageRequest, TraversalOutcome,
    TraversalStats,
};
use std::cell::Cell;
use std::io::Write;
use tracing::{debug, info, warn};
use url::Url;

/// Graph user operations for one tenant
#[derive(Debug)]
pub struct DirectoryClient {
    http: HttpClient,
    tenant_id: String,
    page_size: Option<u32>,
}

impl DirectoryClient {
    /// Create a client over an already configured HTTP client
    pub fn new(http: HttpClient, tenant_id: impl Into<String>) -> Self {
        Self {
            http,
            tenant_id: tenant_id.into(),
            page_size: None,
        }
    }

    /// Create an authenticated client from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let http = HttpClient::with_auth(settings.http_config(), settings.auth_config())?;
        let mut client = Self::new(http, &settings.app_settings.tenant_id);
        client.page_size = settings.graph.page_size;
        Ok(client)
    }

    /// Default page size for listings that do not set one
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Tenant that issues local identities
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn fetcher(&self) -> HttpPageFetcher<'_> {
        HttpPageFetcher::new(&self.http)
    }

    fn request_for(&self, query: &UserQuery) -> PageRequest {
        let mut request = query.to_request();
        if request.page_size.is_none() {
            request.page_size = self.page_size;
        }
        request
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// Fetch the first page of a listing
    ///
    /// Returns the request alongside the page so a traversal can continue it.
    pub async fn first_page(&self, query: &UserQuery) -> Result<(PageRequest, Page<User>)> {
        let request = self.request_for(query);
        let page: Page<User> = self.fetcher().fetch(&request).await?;
        Ok((request, page))
    }

    /// Visit every user matching `query`
    pub async fn traverse_users<V, P>(
        &self,
        query: &UserQuery,
        visitor: V,
        preparer: P,
    ) -> Result<(TraversalOutcome, TraversalStats)>
    where
        V: FnMut(&User) -> Result<bool>,
        P: FnMut(PageRequest) -> Result<PageRequest>,
    {
        let (request, first) = self.first_page(query).await?;
        let fetcher = self.fetcher();
        let mut iter = PageIterator::new(&fetcher, request, first, visitor, preparer);
        let outcome = iter.iterate().await?;
        Ok((outcome, iter.stats()))
    }

    /// Write every user as pretty JSON, one document after another
    pub async fn export_users<W: Write>(&self, writer: &mut W) -> Result<usize> {
        info!("Getting list of users...");
        let (_, stats) = self
            .traverse_users(
                &UserQuery::full(),
                |user| {
                    let json = serde_json::to_string_pretty(user)?;
                    writeln!(writer, "{json}")?;
                    Ok(true)
                },
                |request| {
                    info!("Reading next page of users...");
                    Ok(request)
                },
            )
            .await?;
        writer.flush()?;
        Ok(stats.records_visited)
    }

    /// Count every user in the directory
    pub async fn count_users(&self) -> Result<usize> {
        info!("Getting list of users...");
        let count = Cell::new(0usize);
        self.traverse_users(
            &UserQuery::short(),
            |_| {
                count.set(count.get() + 1);
                Ok(true)
            },
            |request| {
                info!(users = count.get(), "Reading next page of users");
                Ok(request)
            },
        )
        .await?;
        Ok(count.get())
    }

    /// First page of users with the given custom attributes selected
    pub async fn list_users_with_custom_attributes(
        &self,
        helper: &CustomAttributeHelper,
        attributes: &[&str],
    ) -> Result<Vec<User>> {
        let query = UserQuery::short().select(helper.complete_names(attributes)?);
        let (_, page) = self.first_page(&query).await?;
        Ok(page.items)
    }

    /// Users whose local identity matches a sign-in name
    pub async fn find_users_by_sign_in_name(&self, sign_in_name: &str) -> Result<Vec<User>> {
        let query = UserQuery::short().filter(sign_in_name_filter(sign_in_name, &self.tenant_id));
        let (_, page) = self.first_page(&query).await?;
        debug!(sign_in_name, matches = page.len(), "Sign-in name lookup");
        Ok(page.items)
    }

    // ========================================================================
    // Single users
    // ========================================================================

    /// Fetch one user by object ID
    ///
    /// `select` defaults to id, display name and identities when empty.
    pub async fn get_user(&self, id: &str, select: &[&str]) -> Result<User> {
        let select = if select.is_empty() { SHORT_SELECT } else { select };
        let config = RequestConfig::new().query("$select", select.join(","));
        self.http
            .get_json_with_config(&user_path(id)?, config)
            .await
            .map_err(|e| not_found_as_user(e, id))
    }

    /// Create a user and return the stored object
    pub async fn create_user(&self, user: &User) -> Result<User> {
        let body = serde_json::to_value(user)?;
        let response = self.http.post(USERS_PATH, body).await?;
        let created: User = response
            .json()
            .await
            .map_err(|e| Error::decode(format!("Failed to parse created user: {e}")))?;
        info!(id = created.id.as_deref().unwrap_or_default(), "Created user");
        Ok(created)
    }

    /// Delete a user by object ID
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.http
            .delete(&user_path(id)?)
            .await
            .map_err(|e| not_found_as_user(e, id))?;
        info!(id, "Deleted user");
        Ok(())
    }

    /// Set a permanent password that never expires
    pub async fn set_password(&self, id: &str, password: &str) -> Result<()> {
        let patch = User {
            password_policies: Some(B2C_PASSWORD_POLICIES.to_string()),
            password_profile: Some(PasswordProfile::permanent(password)),
            ..Default::default()
        };
        self.http
            .patch(&user_path(id)?, serde_json::to_value(&patch)?)
            .await
            .map_err(|e| not_found_as_user(e, id))?;
        info!(id, "Updated user password");
        Ok(())
    }

    /// Create every imported user, continuing past individual failures
    pub async fn bulk_create(&self, users: Vec<ImportedUser>) -> BulkCreateReport {
        let mut report = BulkCreateReport::default();

        for entry in users {
            let user = entry.into_b2c_user(&self.tenant_id);
            let name = user.label().to_string();

            match self.create_user(&user).await {
                Ok(_) => {
                    info!(user = %name, "User successfully created");
                    report.created.push(name);
                }
                Err(e) => {
                    warn!(user = %name, error = %e, "Failed to create user");
                    report.failed.push(BulkCreateFailure {
                        display_name: name,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

/// `users/{id}` with the id percent-encoded as a single path segment
fn user_path(id: &str) -> Result<String> {
    if matches!(id, "" | "." | "..") {
        return Err(Error::UserNotFound { id: id.to_string() });
    }
    let mut url = Url::parse("https://graph.invalid/")?;
    url.path_segments_mut()
        .map_err(|()| Error::config("Cannot build user path"))?
        .clear()
        .push(USERS_PATH)
        .push(id);
    Ok(url.path().trim_start_matches('/').to_string())
}

fn not_found_as_user(error: Error, id: &str) -> Error {
    if error.status() == Some(404) {
        Error::UserNotFound { id: id.to_string() }
    } else {
        error
    }
}
