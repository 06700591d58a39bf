//! Custom attribute naming
//!
//! B2C stores custom user attributes as directory extensions owned by the
//! `b2c-extensions-app` registration. On the wire they are named
//! `extension_<app client id without dashes>_<attribute>`.

use super::types::{ObjectIdentity, PasswordProfile, User, SIGN_IN_TYPE_EMAIL};
use crate::error::{Error, Result};

/// Sample string attribute
pub const FAVOURITE_SEASON: &str = "FavouriteSeason";

/// Sample boolean attribute
pub const LOVES_PETS: &str = "LovesPets";

/// Builds full extension property names for one extensions app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttributeHelper {
    app_id: String,
}

impl CustomAttributeHelper {
    /// Create a helper for the `b2c-extensions-app` client ID
    pub fn new(extension_app_client_id: &str) -> Result<Self> {
        let app_id = extension_app_client_id.trim().replace('-', "");
        if app_id.is_empty() {
            return Err(Error::invalid_value(
                "AppSettings.B2cExtensionAppClientId",
                "extension app client ID is empty",
            ));
        }
        Ok(Self { app_id })
    }

    /// Client ID with dashes removed
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Full property name for a custom attribute
    pub fn complete_name(&self, attribute: &str) -> Result<String> {
        let attribute = attribute.trim();
        if attribute.is_empty() {
            return Err(Error::invalid_value(
                "attribute",
                "custom attribute name is empty",
            ));
        }
        Ok(format!("extension_{}_{attribute}", self.app_id))
    }

    /// Full property names for several attributes
    pub fn complete_names(&self, attributes: &[&str]) -> Result<Vec<String>> {
        attributes.iter().map(|a| self.complete_name(a)).collect()
    }
}

/// Demo account carrying the two sample custom attributes
pub fn sample_user_with_custom_attributes(
    helper: &CustomAttributeHelper,
    tenant: &str,
    password: impl Into<String>,
) -> Result<User> {
    let mut user = User {
        given_name: Some("Casey".to_string()),
        surname: Some("Jensen".to_string()),
        display_name: Some("Casey Jensen".to_string()),
        identities: Some(vec![ObjectIdentity::local(
            SIGN_IN_TYPE_EMAIL,
            tenant,
            "casey.jensen@example.com",
        )]),
        password_profile: Some(PasswordProfile {
            password: Some(password.into()),
            force_change_password_next_sign_in: None,
        }),
        password_policies: Some("DisablePasswordExpiration".to_string()),
        ..Default::default()
    };
    user.set_additional(helper.complete_name(FAVOURITE_SEASON)?, "summer");
    user.set_additional(helper.complete_name(LOVES_PETS)?, true);
    Ok(user)
}
