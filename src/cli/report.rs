//! Security report command

use std::sync::Arc;

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::ReportContent;
use crate::content;
use crate::error::{Error, Result};
use crate::loader::LoadOutcome;
use crate::models::display::common::format_relative_time;
use crate::output::to_json_pretty;

pub async fn run(ctx: &CommandContext, section: Option<usize>, format: OutputFormat) -> Result<()> {
    let client = Arc::clone(&ctx.client);
    let outcome = ctx
        .loader
        .load(&content::report(), || async move {
            client.fetch_report().await
        })
        .await;

    let report = match outcome {
        LoadOutcome::Failed { error } => {
            return Err(Error::Other(format!("Report unavailable: {}", error)));
        }
        other => other
            .into_value()
            .ok_or_else(|| Error::Other("Report load produced no content".to_string()))?,
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", to_json_pretty(&report)?);
        return Ok(());
    }

    match section {
        Some(n) => print_section(&report, n),
        None => {
            print_overview(&report);
            Ok(())
        }
    }
}

fn print_section(report: &ReportContent, n: usize) -> Result<()> {
    if n < 1 || n > report.sections.len() {
        return Err(Error::Other(format!(
            "Section {} is out of range; the report has {} sections",
            n,
            report.sections.len()
        )));
    }
    let section = &report.sections[n - 1];
    println!("{}", section.title.bold());
    println!();
    println!("{}", section.body);
    Ok(())
}

fn print_overview(report: &ReportContent) {
    println!("{}", report.metadata.title.bold());
    if let Some(ref author) = report.metadata.author {
        println!("by {}", author);
    }
    if let Some(generated) = report.metadata.generated_at {
        println!("generated {}", format_relative_time(generated));
    }

    println!();
    println!("{}", "Contents".bold());
    if report.toc.is_empty() {
        for (i, section) in report.sections.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, section.title);
        }
    } else {
        for (i, entry) in report.toc.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, entry.title);
        }
    }
    println!();
    println!("Use `guardop report --section N` to read a section.");
}
