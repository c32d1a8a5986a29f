//! Firewall state command

use std::sync::Arc;

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::content;
use crate::error::{Error, Result};
use crate::loader::LoadOutcome;
use crate::models::display::FirewallRuleDisplay;
use crate::output::{format_table, to_json_pretty};

pub async fn list(ctx: &CommandContext, format: OutputFormat) -> Result<()> {
    let client = Arc::clone(&ctx.client);
    let outcome = ctx
        .loader
        .load(&content::firewall(), || async move {
            client.fetch_firewall().await
        })
        .await;

    let state = match outcome {
        LoadOutcome::Failed { error } => {
            return Err(Error::Other(format!("Firewall state unavailable: {}", error)));
        }
        other => other
            .into_value()
            .ok_or_else(|| Error::Other("Firewall load produced no content".to_string()))?,
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", to_json_pretty(&state)?);
        return Ok(());
    }

    if state.enabled {
        println!("Firewall: {}", "ENFORCING".green().bold());
    } else {
        println!("Firewall: {}", "MONITOR ONLY".yellow().bold());
    }

    let rows: Vec<FirewallRuleDisplay> = state.rules.into_iter().map(Into::into).collect();
    println!("{}", format_table(&rows));
    Ok(())
}
