//! Notification history commands

use std::sync::Arc;

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::NotificationRecord;
use crate::content;
use crate::error::{Error, Result};
use crate::loader::LoadOutcome;
use crate::models::display::NotificationDisplay;
use crate::notify::{Category, CategoryCounts, classify};
use crate::output::{format_table, to_json_pretty};

pub async fn list(
    ctx: &CommandContext,
    category: Option<Category>,
    format: OutputFormat,
) -> Result<()> {
    let records = load_history(ctx).await?;

    let records: Vec<NotificationRecord> = match category {
        Some(wanted) => records
            .into_iter()
            .filter(|r| classify(r) == wanted)
            .collect(),
        None => records,
    };

    let rows: Vec<NotificationDisplay> = records.into_iter().map(Into::into).collect();

    match format {
        OutputFormat::Json => println!("{}", to_json_pretty(&rows)?),
        _ => println!("{}", format_table(&rows)),
    }
    Ok(())
}

pub async fn counts(ctx: &CommandContext, format: OutputFormat) -> Result<()> {
    let records = load_history(ctx).await?;
    let counts = CategoryCounts::tally(&records);

    if matches!(format, OutputFormat::Json) {
        println!("{}", to_json_pretty(&counts)?);
        return Ok(());
    }

    println!("{}", "Notifications by category".bold());
    println!("  security: {}", counts.security);
    println!("  blocking: {}", counts.blocking);
    println!("  system:   {}", counts.system);
    println!("  other:    {}", counts.other);
    println!("  total:    {}", counts.total());
    Ok(())
}

async fn load_history(ctx: &CommandContext) -> Result<Vec<NotificationRecord>> {
    let client = Arc::clone(&ctx.client);
    let outcome = ctx
        .loader
        .load(&content::notifications(), || async move {
            client.list_notifications().await
        })
        .await;

    match outcome {
        LoadOutcome::Failed { error } => Err(Error::Other(format!(
            "Notification history unavailable: {}",
            error
        ))),
        other => other
            .into_value()
            .ok_or_else(|| Error::Other("Notification load produced no content".to_string())),
    }
}
