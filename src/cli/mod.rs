//! CLI module
//!
//! Command-line interface for managing users in a B2C tenant.
//!
//! # Commands
//!
//! - `list-users` - Export every user to a JSON file
//! - `count-users` - Count users in the directory
//! - `list-custom-attributes` - First page of users with sample custom attributes
//! - `get-user` - Look up a user by object ID
//! - `find-user` - Look up a user by sign-in name
//! - `delete-user` - Delete a user by object ID
//! - `set-password` - Reset a user's password
//! - `bulk-create` - Create users from an import file
//! - `create-with-custom-attributes` - Create a sample user with custom attributes

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
