//! Onboarding guide wizard command

use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Input, Select};

use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::GuideStep;
use crate::content;
use crate::error::{Error, Result};
use crate::output::to_json_pretty;
use crate::wizard::{self, WizardSession};

pub async fn run(ctx: &CommandContext, step: Option<usize>, format: OutputFormat) -> Result<()> {
    let client = Arc::clone(&ctx.client);
    let outcome = ctx
        .loader
        .load(&content::guide(), || async move {
            client.fetch_guide().await
        })
        .await;

    // The guide request carries fallback content, so only a superseded or
    // duplicate load produces nothing.
    let guide = outcome
        .into_value()
        .ok_or_else(|| Error::Other("Guide load produced no content".to_string()))?;
    let steps = wizard::steps_or_default(guide);

    if matches!(format, OutputFormat::Json) {
        println!("{}", to_json_pretty(&steps)?);
        return Ok(());
    }

    match step {
        Some(n) => print_single_step(&steps, n),
        None => run_wizard(&steps),
    }
}

fn print_single_step(steps: &[GuideStep], n: usize) -> Result<()> {
    if n < 1 || n > steps.len() {
        return Err(Error::Other(format!(
            "Step {} is out of range; the guide has {} steps",
            n,
            steps.len()
        )));
    }
    print_step(&steps[n - 1], &format!("Step {} of {}", n, steps.len()));
    Ok(())
}

fn run_wizard(steps: &[GuideStep]) -> Result<()> {
    let mut session = WizardSession::new(steps.len());

    loop {
        print_step(&steps[session.current() - 1], &session.progress());

        let next_label = if session.is_last() { "Finish" } else { "Next" };
        let actions = [next_label, "Back", "Jump to step", "Quit"];
        let choice = Select::new()
            .with_prompt(session.progress())
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                if session.is_last() {
                    println!("{} Guide complete.", "✓".green());
                    return Ok(());
                }
                session.next();
            }
            1 => {
                session.prev();
            }
            2 => {
                let n: usize = Input::new()
                    .with_prompt(format!("Step number (1-{})", session.total()))
                    .interact_text()?;
                if !session.go_to(n) {
                    println!("No step {}.", n);
                }
            }
            _ => return Ok(()),
        }
    }
}

fn print_step(step: &GuideStep, progress: &str) {
    println!();
    println!("{}  {}", progress.dimmed(), step.title.bold());
    if !step.subtitle.is_empty() {
        println!("{}", step.subtitle.dimmed());
    }
    println!();
    println!("{}", step.content);
    if let Some(ref tip) = step.tip {
        println!();
        println!("{} {}", "Tip:".yellow().bold(), tip);
    }
    println!();
}
