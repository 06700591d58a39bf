//! Directory object model
//!
//! Graph `user` resource and the pieces of it a B2C tenant cares about.

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Password policies applied to accounts created or reset by this tool
pub const B2C_PASSWORD_POLICIES: &str = "DisablePasswordExpiration,DisableStrongPassword";

/// Sign-in type for email-based local accounts
pub const SIGN_IN_TYPE_EMAIL: &str = "emailAddress";

/// Sign-in type for username-based local accounts
pub const SIGN_IN_TYPE_USER_NAME: &str = "userName";

/// A directory user
///
/// Unset fields are omitted on the wire, so the same type serves listing
/// results, create bodies and PATCH bodies. Anything Graph returns that is
/// not modelled here (custom extension attributes, OData annotations) lands
/// in `additional_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_mails: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,

    /// Sign-in identities; local accounts carry the tenant as issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<ObjectIdentity>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_profile: Option<PasswordProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_policies: Option<String>,

    /// Extension attributes and anything else not modelled above
    #[serde(flatten)]
    pub additional_data: JsonObject,
}

impl User {
    /// Value of an extension or other unmodelled property
    pub fn additional(&self, key: &str) -> Option<&JsonValue> {
        self.additional_data.get(key)
    }

    /// Set an extension or other unmodelled property
    pub fn set_additional(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.additional_data.insert(key.into(), value.into());
    }

    /// Display name, or the object ID when unnamed
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// A sign-in identity on a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectIdentity {
    /// `emailAddress`, `userName`, `federated`, `userPrincipalName`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in_type: Option<String>,

    /// Tenant domain for local accounts, identity provider otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Sign-in name or external subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_assigned_id: Option<String>,
}

impl ObjectIdentity {
    /// Local account identity issued by `tenant`
    pub fn local(
        sign_in_type: impl Into<String>,
        tenant: impl Into<String>,
        sign_in_name: impl Into<String>,
    ) -> Self {
        Self {
            sign_in_type: Some(sign_in_type.into()),
            issuer: Some(tenant.into()),
            issuer_assigned_id: Some(sign_in_name.into()),
        }
    }

    /// Check if this is an email or username local account
    pub fn is_local_account(&self) -> bool {
        matches!(
            self.sign_in_type.as_deref(),
            Some(SIGN_IN_TYPE_EMAIL | SIGN_IN_TYPE_USER_NAME)
        )
    }
}

/// Password settings on a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_change_password_next_sign_in: Option<bool>,
}

impl PasswordProfile {
    /// Profile setting `password` without forcing a change at next sign-in
    pub fn permanent(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            force_change_password_next_sign_in: Some(false),
        }
    }
}

/// One user that bulk creation could not create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCreateFailure {
    /// Display name from the import entry
    pub display_name: String,
    /// Rendered error
    pub error: String,
}

/// Result of a bulk creation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkCreateReport {
    /// Display names of created users, in input order
    pub created: Vec<String>,
    /// Entries that failed, in input order
    pub failed: Vec<BulkCreateFailure>,
}

impl BulkCreateReport {
    /// Number of entries attempted
    pub fn total(&self) -> usize {
        self.created.len() + self.failed.len()
    }

    /// Check if every entry was created
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
