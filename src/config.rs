//! Application settings
//!
//! Settings are read from an `appsettings.json` style document:
//!
//! ```json
//! {
//!   "AppSettings": {
//!     "TenantId": "contoso.onmicrosoft.com",
//!     "AppId": "00000000-0000-0000-0000-000000000000",
//!     "ClientSecret": "...",
//!     "B2cExtensionAppClientId": "11111111-1111-1111-1111-111111111111",
//!     "UsersFileName": "users.json"
//!   },
//!   "Graph": { "PageSize": 100 }
//! }
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default Graph endpoint
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default Entra ID authority
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Default import file name
pub const DEFAULT_USERS_FILE_NAME: &str = "users.json";

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete settings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Tenant and app registration
    #[serde(default)]
    pub app_settings: AppSettings,

    /// Graph transport tuning
    #[serde(default)]
    pub graph: GraphSettings,
}

/// Tenant and app registration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    /// Tenant domain or ID, also the issuer of local identities
    #[serde(default)]
    pub tenant_id: String,

    /// Client ID of the registered application
    #[serde(default)]
    pub app_id: String,

    /// Client secret of the registered application
    #[serde(default)]
    pub client_secret: String,

    /// Client ID of `b2c-extensions-app`, owner of custom attributes
    #[serde(default)]
    pub b2c_extension_app_client_id: Option<String>,

    /// Users file read by bulk import
    #[serde(default = "default_users_file_name")]
    pub users_file_name: String,
}

fn default_users_file_name() -> String {
    DEFAULT_USERS_FILE_NAME.to_string()
}

/// Graph transport tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GraphSettings {
    /// Graph endpoint including API version
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token authority host
    #[serde(default = "default_authority_host")]
    pub authority_host: String,

    /// Requested page size for listings; server default when unset
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Client-side request rate; 0 disables throttling
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            authority_host: default_authority_host(),
            page_size: None,
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_requests_per_second() -> u32 {
    10
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_json_str(&content)
    }

    /// Parse settings from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse settings: {e}")))
    }

    /// Check that the fields needed to reach Graph are present
    pub fn validate(&self) -> Result<()> {
        let app = &self.app_settings;
        for (field, value) in [
            ("AppSettings.TenantId", &app.tenant_id),
            ("AppSettings.AppId", &app.app_id),
            ("AppSettings.ClientSecret", &app.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        url::Url::parse(&self.graph.base_url)
            .map_err(|e| Error::invalid_value("Graph.BaseUrl", e.to_string()))?;
        url::Url::parse(&self.graph.authority_host)
            .map_err(|e| Error::invalid_value("Graph.AuthorityHost", e.to_string()))?;

        if self.graph.page_size == Some(0) {
            return Err(Error::invalid_value(
                "Graph.PageSize",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// OAuth2 client-credentials config for the registered app
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::client_credentials(
            &self.graph.authority_host,
            &self.app_settings.tenant_id,
            &self.app_settings.app_id,
            &self.app_settings.client_secret,
        )
    }

    /// HTTP client config for the Graph endpoint
    pub fn http_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.graph.base_url)
            .timeout(Duration::from_secs(self.graph.timeout_seconds))
            .max_retries(self.graph.max_retries);

        match self.graph.requests_per_second {
            0 => builder.no_rate_limit().build(),
            rps => builder.rate_limit(RateLimiterConfig::per_second(rps)).build(),
        }
    }

    /// Extension app client ID, required by custom attribute commands
    pub fn extension_app_client_id(&self) -> Result<&str> {
        self.app_settings
            .b2c_extension_app_client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::invalid_value(
                    "AppSettings.B2cExtensionAppClientId",
                    "missing; find the 'b2c-extensions-app' registration in the Azure portal",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "AppSettings": {
            "TenantId": "contoso.onmicrosoft.com",
            "AppId": "app-123",
            "ClientSecret": "secret",
            "B2cExtensionAppClientId": "aaaa-bbbb",
            "UsersFileName": "people.json"
        },
        "Graph": {
            "PageSize": 50,
            "RequestsPerSecond": 0
        }
    }"#;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();

        assert_eq!(settings.app_settings.tenant_id, "contoso.onmicrosoft.com");
        assert_eq!(settings.app_settings.app_id, "app-123");
        assert_eq!(settings.app_settings.users_file_name, "people.json");
        assert_eq!(settings.extension_app_client_id().unwrap(), "aaaa-bbbb");
        assert_eq!(settings.graph.page_size, Some(50));
        assert_eq!(settings.graph.base_url, DEFAULT_GRAPH_BASE_URL);
        assert_eq!(settings.graph.max_retries, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_graph_section() {
        let settings = Settings::from_json_str(
            r#"{"AppSettings": {"TenantId": "t", "AppId": "a", "ClientSecret": "s"}}"#,
        )
        .unwrap();

        assert_eq!(settings.app_settings.users_file_name, DEFAULT_USERS_FILE_NAME);
        assert_eq!(settings.graph.authority_host, DEFAULT_AUTHORITY_HOST);
        assert_eq!(settings.graph.timeout_seconds, 30);
        assert_eq!(settings.graph.requests_per_second, 10);
        assert!(settings.graph.page_size.is_none());
    }

    #[test]
    fn test_validate_missing_fields() {
        let settings =
            Settings::from_json_str(r#"{"AppSettings": {"TenantId": "t", "AppId": "a"}}"#).unwrap();

        match settings.validate() {
            Err(Error::MissingConfigField { field }) => {
                assert_eq!(field, "AppSettings.ClientSecret");
            }
            other => panic!("Expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut settings = Settings::from_json_str(SAMPLE).unwrap();
        settings.graph.base_url = "not a url".to_string();

        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_missing_extension_app_id() {
        let settings = Settings::default();
        assert!(matches!(
            settings.extension_app_client_id(),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_auth_config() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();

        match settings.auth_config() {
            AuthConfig::Oauth2ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scopes,
            } => {
                assert_eq!(
                    token_url,
                    "https://login.microsoftonline.com/contoso.onmicrosoft.com/oauth2/v2.0/token"
                );
                assert_eq!(client_id, "app-123");
                assert_eq!(client_secret, "secret");
                assert_eq!(scopes, vec!["https://graph.microsoft.com/.default".to_string()]);
            }
            other => panic!("Expected client credentials, got {other:?}"),
        }
    }

    #[test]
    fn test_http_config() {
        let settings = Settings::from_json_str(SAMPLE).unwrap();
        let config = settings.http_config();

        assert_eq!(config.base_url.as_deref(), Some(DEFAULT_GRAPH_BASE_URL));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.rate_limit.is_none());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appsettings.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.app_settings.client_secret, "secret");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::from_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json_str("{ not json"),
            Err(Error::Config { .. })
        ));
    }
}
