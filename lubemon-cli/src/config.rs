//! Connection settings from flags and the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lubemon_core::{ApiMode, ConnectionConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Cli;

/// On-disk connection settings.
///
/// Every field is optional so a partial file can be completed by flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Base URL of the LubeLogger server.
    pub url: Option<String>,
    /// Basic-auth username.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Seconds between refresh cycles.
    pub update_interval: Option<u64>,
    /// Fetch scoping mode.
    pub mode: Option<ApiMode>,
}

impl FileConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lubemon")
            .join("config.json")
    }

    /// Loads settings from a specific path. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using flags only");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Resolves connection settings, flags over file.
pub fn resolve_connection(cli: &Cli) -> Result<ConnectionConfig> {
    let path = cli.config.clone().unwrap_or_else(FileConfig::default_path);
    let file = FileConfig::load(&path)?;

    let url = cli.url.clone().or(file.url).unwrap_or_default();
    let username = cli.username.clone().or(file.username).unwrap_or_default();
    let password = cli.password.clone().or(file.password).unwrap_or_default();

    let mut config = ConnectionConfig::new(&url, &username, &password).context(
        "incomplete connection settings; pass --url, --username and --password or a config file",
    )?;
    if let Some(secs) = file.update_interval {
        config.update_interval_secs = secs;
    }
    if let Some(mode) = cli.mode.or(file.mode) {
        config.mode = mode;
    }
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
