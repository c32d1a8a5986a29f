//! Shared command execution context

use std::sync::Arc;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::client::{GuardianApi, GuardianClient};
use crate::config::Config;
use crate::error::Result;
use crate::loader::{ContentLoader, SilentReporter, StatusReporter, TermReporter};

/// Everything a networked command needs: validated config, an API client,
/// and a loader wired to the right status reporter for the output format.
pub struct CommandContext {
    pub config: Config,
    pub client: Arc<dyn GuardianApi>,
    pub loader: ContentLoader<Box<dyn StatusReporter>>,
}

impl CommandContext {
    pub fn new(config_path: Option<&str>, format: OutputFormat, no_cache: bool) -> Result<Self> {
        let config = Config::load_at(config_path)?;
        config.validate_connection()?;

        let client = GuardianClient::new(
            config.server_url()?,
            config.api_key.clone().unwrap_or_default(),
        )?;

        // Status indicators go to stderr; suppress them entirely for JSON
        // so piped output stays clean even when stderr is merged.
        let reporter: Box<dyn StatusReporter> = match format {
            OutputFormat::Json => Box::new(SilentReporter),
            _ => Box::new(TermReporter::new()),
        };

        let cache = if no_cache || config.preferences.no_cache {
            None
        } else {
            // A broken cache degrades to no-cache mode rather than
            // blocking the command.
            match CacheStorage::open() {
                Ok(storage) => Some(storage),
                Err(e) => {
                    log::warn!("Cache unavailable, continuing without it: {}", e);
                    None
                }
            }
        };

        Ok(Self {
            config,
            client: Arc::new(client),
            loader: ContentLoader::new(cache, reporter),
        })
    }
}
