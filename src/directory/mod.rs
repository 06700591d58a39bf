//! Directory module
//!
//! User management for an Azure AD B2C tenant over Microsoft Graph.
//!
//! # Overview
//!
//! [`DirectoryClient`] wraps an authenticated [`HttpClient`](crate::http::HttpClient)
//! and exposes listing, lookup, creation, deletion and password operations.
//! Listings go through the pagination engine, so every user in a
//! multi-page collection is visited exactly once and in server order.

mod client;
mod extensions;
mod import;
mod password;
mod query;
mod types;

pub use client::DirectoryClient;
pub use extensions::{
    sample_user_with_custom_attributes, CustomAttributeHelper, FAVOURITE_SEASON, LOVES_PETS,
};
pub use import::{ImportedUser, UsersFile};
pub use password::generate_password;
pub use query::{
    escape_odata_string, sign_in_name_filter, UserQuery, FULL_SELECT, SHORT_SELECT, USERS_PATH,
};
pub use types::{
    BulkCreateFailure, BulkCreateReport, ObjectIdentity, PasswordProfile, User,
    B2C_PASSWORD_POLICIES, SIGN_IN_TYPE_EMAIL, SIGN_IN_TYPE_USER_NAME,
};
