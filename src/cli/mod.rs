//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod cache;
pub mod context;
pub mod firewall;
pub mod guide;
pub mod init;
pub mod notify;
pub mod report;
pub mod status;

pub use context::CommandContext;

use crate::notify::Category;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    Pretty,
    /// Table format - machine-parseable, one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// guardop - CLI companion for the SSH Guardian monitoring platform
#[derive(Parser, Debug)]
#[command(name = "guardop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "GUARDOP_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "GUARDOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GUARDOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from the server
    #[arg(long, global = true, env = "GUARDOP_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize guardop configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Browse the onboarding guide
    #[command(after_help = "EXAMPLES:\n  \
        guardop guide              # Interactive step-by-step wizard\n  \
        guardop guide --step 3     # Print one step and exit")]
    Guide {
        /// Print a single step (1-based) instead of the interactive wizard
        #[arg(long)]
        step: Option<usize>,
    },

    /// View the generated security report
    #[command(after_help = "EXAMPLES:\n  \
        guardop report                 # Metadata and table of contents\n  \
        guardop report --section 2     # Print one section's body")]
    Report {
        /// Print a single section (1-based) instead of the overview
        #[arg(long)]
        section: Option<usize>,
    },

    /// View firewall state
    #[command(subcommand)]
    Firewall(FirewallCommands),

    /// View notification history
    #[command(subcommand)]
    Notify(NotifyCommands),

    /// Manage the local response cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

/// Firewall subcommands
#[derive(Subcommand, Debug)]
pub enum FirewallCommands {
    /// List active firewall rules
    List,
}

/// Notification subcommands
#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// List notification history, newest first
    List {
        /// Show only one derived category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },

    /// Show per-category notification counts
    Counts,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached content
    Clear,
    /// Print cache directory path
    Path,
}
