//! Profile management command implementations

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::context::{AppProfiles, PartialCredentials, open_profiles};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::ProfileStore;
use crate::error::{ConfigError, Error, Result};
use crate::models::ProfileListItem;
use crate::output::{Formattable, json, table};

/// Save the current credentials under `name`
pub fn save(opts: &GlobalOptions, name: &str) -> Result<()> {
    let partial = PartialCredentials::gather(opts)?;
    let partial = if partial.client_secret.is_none() {
        let secret: String = Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Client secret")
            .interact()?;
        PartialCredentials {
            client_secret: Some(secret),
            ..partial
        }
    } else {
        partial
    };
    let credentials = partial.complete()?;

    let profiles = open_profiles(opts)?;
    profiles.save(name, &credentials)?;

    match opts.format {
        OutputFormat::Json => {
            let item = list_item(&profiles, name, &credentials.env_id, &credentials.client_id);
            println!("{}", json::format_json(&item)?);
        }
        _ => {
            println!("{} Profile '{}' saved", "✓".green(), name.bold());
            println!(
                "  File: {}",
                profiles.store().path().display().to_string().dimmed()
            );
        }
    }

    Ok(())
}

/// List saved profiles
pub fn list(opts: &GlobalOptions) -> Result<()> {
    let profiles = open_profiles(opts)?;
    let items = list_items(&profiles)?;

    match opts.format {
        OutputFormat::Json => items.print(OutputFormat::Json)?,
        _ => println!(
            "{}",
            table::format_table_or(
                &items,
                "No profiles saved. Use `usermanager profile save <NAME>` to create one."
            )
        ),
    }

    Ok(())
}

/// Show one profile. The secret is never printed, only whether one is stored.
pub fn show(opts: &GlobalOptions, name: Option<&str>) -> Result<()> {
    let name = name.or(opts.profile_ref()).ok_or_else(|| {
        Error::Other("No profile given. Pass a name or use --profile.".to_string())
    })?;

    let profiles = open_profiles(opts)?;
    let profile = profiles
        .store()
        .load(name)?
        .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;
    let item = list_item(&profiles, name, &profile.env_id, &profile.cl_id);

    match opts.format {
        OutputFormat::Json => println!("{}", json::format_json(&item)?),
        _ => {
            println!("{}", format!("Profile: {}", item.name).bold());
            println!("  Environment ID: {}", item.env_id);
            println!("  Client ID:      {}", item.client_id);
            println!("  Secret stored:  {}", item.has_secret);
        }
    }

    Ok(())
}

fn list_items(profiles: &AppProfiles) -> Result<Vec<ProfileListItem>> {
    let mut items = Vec::new();
    for name in profiles.list()? {
        if let Some(profile) = profiles.store().load(&name)? {
            items.push(list_item(profiles, &name, &profile.env_id, &profile.cl_id));
        }
    }
    Ok(items)
}

fn list_item(profiles: &AppProfiles, name: &str, env_id: &str, client_id: &str) -> ProfileListItem {
    ProfileListItem {
        name: name.to_string(),
        env_id: env_id.to_string(),
        client_id: client_id.to_string(),
        has_secret: secret_label(profiles.has_secret(name)),
    }
}

fn secret_label(stored: Result<bool>) -> String {
    match stored {
        Ok(true) => "yes".to_string(),
        Ok(false) => "no".to_string(),
        Err(e) => {
            debug!("Vault lookup failed: {}", e);
            "unknown".to_string()
        }
    }
}
