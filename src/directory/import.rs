//! Bulk import file
//!
//! ```json
//! {
//!   "users": [
//!     {
//!       "displayName": "Amanda Polly",
//!       "identities": [
//!         { "signInType": "emailAddress", "issuerAssignedId": "amanda@example.com" }
//!       ],
//!       "password": "..."
//!     }
//!   ]
//! }
//! ```

use super::types::{PasswordProfile, User, B2C_PASSWORD_POLICIES};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parsed import file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersFile {
    #[serde(default)]
    pub users: Vec<ImportedUser>,
}

impl UsersFile {
    /// Read an import file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse an import document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::decode(format!("Failed to parse users file: {e}")))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if the file has no entries
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// One import entry: a user plus its initial password
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportedUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(flatten)]
    pub user: User,
}

impl ImportedUser {
    /// Turn the entry into a create body for a B2C local account
    ///
    /// The password moves into the password profile without a forced change,
    /// and email/username identities are issued by `tenant`.
    pub fn into_b2c_user(self, tenant: &str) -> User {
        let mut user = self.user;

        if let Some(password) = self.password {
            user.password_profile = Some(PasswordProfile::permanent(password));
        }
        user.password_policies = Some(B2C_PASSWORD_POLICIES.to_string());

        for identity in user.identities.iter_mut().flatten() {
            if identity.is_local_account() {
                identity.issuer = Some(tenant.to_string());
            }
        }

        user
    }
}
