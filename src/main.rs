//! guardop - CLI companion for the SSH Guardian monitoring platform

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod content;
mod error;
mod loader;
mod models;
mod notify;
mod output;
mod wizard;

use cli::{CacheCommands, Cli, CommandContext, Commands, FirewallCommands, NotifyCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()),
        Commands::Status => cli::status::run(cli.config.as_deref(), cli.format),
        Commands::Version => {
            println!("guardop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Guide { step } => {
            let ctx = CommandContext::new(cli.config.as_deref(), cli.format, cli.no_cache)?;
            cli::guide::run(&ctx, step, cli.format).await
        }
        Commands::Report { section } => {
            let ctx = CommandContext::new(cli.config.as_deref(), cli.format, cli.no_cache)?;
            cli::report::run(&ctx, section, cli.format).await
        }
        Commands::Firewall(cmd) => match cmd {
            FirewallCommands::List => {
                let ctx = CommandContext::new(cli.config.as_deref(), cli.format, cli.no_cache)?;
                cli::firewall::list(&ctx, cli.format).await
            }
        },
        Commands::Notify(cmd) => {
            let ctx = CommandContext::new(cli.config.as_deref(), cli.format, cli.no_cache)?;
            match cmd {
                NotifyCommands::List { category } => {
                    cli::notify::list(&ctx, category, cli.format).await
                }
                NotifyCommands::Counts => cli::notify::counts(&ctx, cli.format).await,
            }
        }
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(cli.format),
            CacheCommands::Clear => cli::cache::clear(),
            CacheCommands::Path => cli::cache::path(),
        },
    }
}
