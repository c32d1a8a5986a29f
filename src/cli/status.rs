//! Configuration status command

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output::to_json_pretty;

/// Mask an API key down to a recognizable prefix
fn mask_key(key: &str) -> String {
    // Keys are user-authored; count chars, not bytes
    let prefix: String = key.chars().take(4).collect();
    if prefix.chars().count() == key.chars().count() {
        return "****".to_string();
    }
    format!("{}****", prefix)
}

pub fn run(config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let path = Config::resolve_path(config_path)?;
    let config = Config::load_from(path.clone()).ok();

    let cache_stats = CacheStorage::open().ok().and_then(|s| s.stats().ok());

    if matches!(format, OutputFormat::Json) {
        let json = serde_json::json!({
            "config_path": path.display().to_string(),
            "configured": config.is_some(),
            "server_url": config.as_ref().and_then(|c| c.server_url.clone()),
            "api_key_set": config.as_ref().is_some_and(|c| c.api_key.is_some()),
            "cache": cache_stats.as_ref().map(|s| serde_json::json!({
                "total_entries": s.total_entries,
                "valid_entries": s.valid_entries,
                "expired_entries": s.expired_entries,
            })),
        });
        println!("{}", to_json_pretty(&json)?);
        return Ok(());
    }

    println!("{}", "guardop status".bold());
    println!("  Config file: {}", path.display());

    match config {
        None => {
            println!("  {} Not configured. Run `guardop init`.", "✗".red());
        }
        Some(config) => {
            match &config.server_url {
                Some(url) => println!("  Server:      {}", url),
                None => println!("  Server:      {} (missing)", "✗".red()),
            }
            match &config.api_key {
                Some(key) => println!("  API key:     {}", mask_key(key)),
                None => println!("  API key:     {} (missing)", "✗".red()),
            }
            match config.validate_connection() {
                Ok(()) => println!("  {} Ready", "✓".green()),
                Err(e) => println!("  {} {}", "✗".red(), e),
            }
        }
    }

    match cache_stats {
        Some(stats) => println!(
            "  Cache:       {} entries ({} valid, {} expired)",
            stats.total_entries, stats.valid_entries, stats.expired_entries
        ),
        None => println!("  Cache:       unavailable"),
    }

    Ok(())
}
