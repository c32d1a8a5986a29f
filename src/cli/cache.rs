//! Cache management commands

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::display::common::format_relative_time;
use crate::output::to_json_pretty;

pub fn status(format: OutputFormat) -> Result<()> {
    let storage = CacheStorage::open()?;
    let stats = storage.stats()?;

    if matches!(format, OutputFormat::Json) {
        let json = serde_json::json!({
            "path": CacheStorage::cache_dir()?.display().to_string(),
            "total_entries": stats.total_entries,
            "valid_entries": stats.valid_entries,
            "expired_entries": stats.expired_entries,
            "oldest_entry_ms": stats.oldest_entry_ms,
            "newest_entry_ms": stats.newest_entry_ms,
        });
        println!("{}", to_json_pretty(&json)?);
        return Ok(());
    }

    println!("{}", "Cache status".bold());
    println!("  Location: {}", CacheStorage::cache_dir()?.display());
    println!("  Entries:  {}", stats.total_entries);
    println!("  Valid:    {}", stats.valid_entries);
    println!("  Expired:  {}", stats.expired_entries);

    if let Some(age) = entry_age(stats.oldest_entry_ms) {
        println!("  Oldest:   {}", age);
    }
    if let Some(age) = entry_age(stats.newest_entry_ms) {
        println!("  Newest:   {}", age);
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let storage = CacheStorage::open()?;
    let result = storage.clear_all()?;
    println!(
        "{} Removed {} cache entries",
        "✓".green(),
        result.entries_removed
    );
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", CacheStorage::cache_dir()?.display());
    Ok(())
}

fn entry_age(stored_ms: Option<i64>) -> Option<String> {
    let ts: DateTime<Utc> = DateTime::from_timestamp_millis(stored_ms?)?;
    Some(format_relative_time(ts))
}
