//! Interactive configuration setup

use colored::Colorize;
use dialoguer::{Confirm, Input, Password};

use crate::config::Config;
use crate::error::Result;

pub fn run(config_path: Option<&str>) -> Result<()> {
    let path = Config::resolve_path(config_path)?;
    let existing = Config::load_from(path.clone()).ok();

    if existing.is_some() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Keeping existing configuration.");
            return Ok(());
        }
    }
    let current = existing.unwrap_or_default();

    println!("{}", "Configure guardop".bold());

    let server_url: String = Input::new()
        .with_prompt("Guardian server URL")
        .with_initial_text(current.server_url.unwrap_or_default())
        .validate_with(|input: &String| {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()?;

    let api_key = Password::new()
        .with_prompt("API key")
        .with_confirmation("Confirm API key", "Keys do not match")
        .interact()?;

    let config = Config {
        server_url: Some(server_url.trim().to_string()),
        api_key: Some(api_key),
        preferences: current.preferences,
    };
    config.save_to(path.clone())?;

    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        path.display()
    );
    println!("Run `guardop status` to verify the setup.");
    Ok(())
}
