//! Configuration management for guardop

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the SSH Guardian server (e.g., https://guardian.example.com)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Guardian API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Disable the local response cache by default
    #[serde(default)]
    pub no_cache: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            no_cache: false,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".guardop").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Config holds the API key, keep it private
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that the client can talk to a server
    pub fn validate_connection(&self) -> Result<()> {
        if self.server_url.is_none() {
            return Err(ConfigError::MissingServerUrl.into());
        }
        if self.api_key.is_none() {
            return Err(ConfigError::MissingApiKey.into());
        }
        Ok(())
    }

    /// Server URL with any trailing slash trimmed
    pub fn server_url(&self) -> Result<String> {
        self.server_url
            .as_ref()
            .map(|u| u.trim_end_matches('/').to_string())
            .ok_or_else(|| ConfigError::MissingServerUrl.into())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            api_key: None,
            preferences: Preferences::default(),
        }
    }
}
