//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::directory::{
    generate_password, sample_user_with_custom_attributes, CustomAttributeHelper,
    DirectoryClient, UsersFile, FAVOURITE_SEASON, LOVES_PETS,
};
use crate::error::{Error, Result, ResultExt};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;
        let client = DirectoryClient::from_settings(&settings)?;

        match &self.cli.command {
            Commands::ListUsers { output } => self.list_users(&client, output).await,
            Commands::CountUsers => self.count_users(&client).await,
            Commands::ListCustomAttributes => {
                self.list_custom_attributes(&client, &settings).await
            }
            Commands::GetUser { id } => self.get_user(&client, id).await,
            Commands::FindUser { sign_in_name } => self.find_user(&client, sign_in_name).await,
            Commands::DeleteUser { id } => self.delete_user(&client, id).await,
            Commands::SetPassword { id, password } => {
                self.set_password(&client, id, password).await
            }
            Commands::BulkCreate { file } => {
                let path = file
                    .clone()
                    .unwrap_or_else(|| settings.app_settings.users_file_name.clone().into());
                self.bulk_create(&client, &path).await
            }
            Commands::CreateWithCustomAttributes => {
                self.create_with_custom_attributes(&client, &settings).await
            }
        }
    }

    /// Load settings, inline JSON first
    fn load_settings(&self) -> Result<Settings> {
        match &self.cli.config_json {
            Some(json) => Settings::from_json_str(json),
            None => Settings::from_file(&self.cli.config),
        }
    }

    fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{json}");
        Ok(())
    }

    async fn list_users(&self, client: &DirectoryClient, output: &Path) -> Result<()> {
        let file = File::create(output)
            .with_context(|| format!("Cannot open {} for writing", output.display()))?;
        let mut writer = BufWriter::new(file);

        let count = client.export_users(&mut writer).await?;
        println!("Wrote {count} users to {}", output.display());
        Ok(())
    }

    async fn count_users(&self, client: &DirectoryClient) -> Result<()> {
        let count = client.count_users().await?;
        println!("========================");
        println!("Number of users in the directory: {count}");
        println!("========================");
        Ok(())
    }

    async fn list_custom_attributes(
        &self,
        client: &DirectoryClient,
        settings: &Settings,
    ) -> Result<()> {
        let helper = CustomAttributeHelper::new(settings.extension_app_client_id()?)?;
        info!(
            "Getting list of users with the custom attributes '{FAVOURITE_SEASON}' (string) and '{LOVES_PETS}' (boolean)"
        );

        let users = client
            .list_users_with_custom_attributes(&helper, &[FAVOURITE_SEASON, LOVES_PETS])
            .await?;
        for user in &users {
            Self::print_json(user, false)?;
        }
        Ok(())
    }

    async fn get_user(&self, client: &DirectoryClient, id: &str) -> Result<()> {
        info!("Looking for user with object ID '{id}'...");
        let user = client.get_user(id, &[]).await?;
        Self::print_json(&user, false)
    }

    async fn find_user(&self, client: &DirectoryClient, sign_in_name: &str) -> Result<()> {
        info!("Looking for user with sign-in name '{sign_in_name}'...");
        let users = client.find_users_by_sign_in_name(sign_in_name).await?;
        if users.is_empty() {
            println!("No user found with sign-in name '{sign_in_name}'");
            return Ok(());
        }
        Self::print_json(&users, false)
    }

    async fn delete_user(&self, client: &DirectoryClient, id: &str) -> Result<()> {
        client.delete_user(id).await?;
        println!("User with object ID '{id}' successfully deleted.");
        Ok(())
    }

    async fn set_password(&self, client: &DirectoryClient, id: &str, password: &str) -> Result<()> {
        client.set_password(id, password).await?;
        println!("User with object ID '{id}' successfully updated.");
        Ok(())
    }

    async fn bulk_create(&self, client: &DirectoryClient, path: &Path) -> Result<()> {
        let file = UsersFile::from_file(path)?;
        info!(users = file.len(), "Starting bulk create operation...");

        let report = client.bulk_create(file.users).await;
        for name in &report.created {
            println!("User '{name}' successfully created.");
        }
        for failure in &report.failed {
            eprintln!("User '{}' failed: {}", failure.display_name, failure.error);
        }

        if report.is_complete() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} of {} users could not be created",
                report.failed.len(),
                report.total()
            )))
        }
    }

    async fn create_with_custom_attributes(
        &self,
        client: &DirectoryClient,
        settings: &Settings,
    ) -> Result<()> {
        let helper = CustomAttributeHelper::new(settings.extension_app_client_id()?)?;
        let season = helper.complete_name(FAVOURITE_SEASON)?;
        let pets = helper.complete_name(LOVES_PETS)?;

        info!(
            "Create a user with the custom attributes '{FAVOURITE_SEASON}' (string) and '{LOVES_PETS}' (boolean)"
        );
        let user = sample_user_with_custom_attributes(
            &helper,
            client.tenant_id(),
            generate_password(4, 8, 4),
        )?;

        let result = async {
            let created = client.create_user(&user).await?;
            let id = created
                .id
                .ok_or_else(|| Error::decode("Created user has no object ID"))?;
            info!("Created the new user. Now get the created user with object ID '{id}'...");

            client
                .get_user(
                    &id,
                    &[
                        "id",
                        "givenName",
                        "surname",
                        "displayName",
                        "identities",
                        season.as_str(),
                        pets.as_str(),
                    ],
                )
                .await
        }
        .await;

        let fetched = match result {
            Ok(user) => user,
            Err(e) => {
                if e.status() == Some(400) {
                    eprintln!(
                        "Have you created the custom attributes '{FAVOURITE_SEASON}' (string) and '{LOVES_PETS}' (boolean) in your tenant?"
                    );
                }
                return Err(e);
            }
        };

        println!("DisplayName: {}", fetched.label());
        for (name, key) in [(FAVOURITE_SEASON, &season), (LOVES_PETS, &pets)] {
            let value = fetched
                .additional(key)
                .map_or_else(|| "<not set>".to_string(), ToString::to_string);
            println!("{name}: {value}");
        }
        println!();
        Self::print_json(&fetched, true)
    }
}
