//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Azure AD B2C user management over Microsoft Graph
#[derive(Parser, Debug)]
#[command(name = "b2c-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (JSON, appsettings.json layout)
    #[arg(short = 'C', long, global = true, default_value = "appsettings.json")]
    pub config: PathBuf,

    /// Inline settings JSON, takes precedence over --config
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Export every user in the directory as JSON
    ListUsers {
        /// Output file
        #[arg(short, long, default_value = "AllUsers.json")]
        output: PathBuf,
    },

    /// Count users in the directory
    CountUsers,

    /// List one page of users with the FavouriteSeason and LovesPets attributes
    ListCustomAttributes,

    /// Get a user by object ID
    GetUser {
        /// User object ID
        #[arg(long)]
        id: String,
    },

    /// Find users by sign-in name (username or email address)
    FindUser {
        /// Sign-in name
        #[arg(long)]
        sign_in_name: String,
    },

    /// Delete a user by object ID
    DeleteUser {
        /// User object ID
        #[arg(long)]
        id: String,
    },

    /// Set a user's password
    SetPassword {
        /// User object ID
        #[arg(long)]
        id: String,

        /// New password
        #[arg(long)]
        password: String,
    },

    /// Create users from an import file
    BulkCreate {
        /// Import file (defaults to AppSettings.UsersFileName)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Create a sample user with custom attributes and read it back
    CreateWithCustomAttributes,
}
