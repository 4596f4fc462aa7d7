//! Connection settings for a LubeLogger server.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default polling interval, in seconds.
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 300;

// ============================================================================
// Api Mode
// ============================================================================

/// How fetches are scoped against the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiMode {
    /// Probe the server at setup and pick one of the other modes.
    #[default]
    Auto,
    /// Enumerate vehicles and fetch each field per vehicle.
    PerVehicle,
    /// Fetch each field once for the whole instance.
    Flat,
}

impl ApiMode {
    /// Stable name used in logs and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMode::Auto => "auto",
            ApiMode::PerVehicle => "per_vehicle",
            ApiMode::Flat => "flat",
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ApiMode::Auto),
            "per_vehicle" | "per-vehicle" | "vehicle" => Ok(ApiMode::PerVehicle),
            "flat" => Ok(ApiMode::Flat),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown api mode: {other}"
            ))),
        }
    }
}

// ============================================================================
// Connection Config
// ============================================================================

/// Everything needed to reach one LubeLogger server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the server, without a trailing slash.
    pub base_url: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Seconds between refresh cycles.
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: u64,
    /// Fetch scoping mode.
    #[serde(default)]
    pub mode: ApiMode,
}

fn default_update_interval() -> u64 {
    DEFAULT_UPDATE_INTERVAL_SECS
}

impl ConnectionConfig {
    /// Builds a validated config with the default interval and auto mode.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] when the URL or either
    /// credential is empty.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self, CoreError> {
        let base_url = normalize_url(base_url);
        if base_url.is_empty() {
            return Err(CoreError::InvalidConfig("server URL is required".into()));
        }
        if username.is_empty() {
            return Err(CoreError::InvalidConfig("username is required".into()));
        }
        if password.is_empty() {
            return Err(CoreError::InvalidConfig("password is required".into()));
        }
        Ok(Self {
            base_url,
            username: username.to_string(),
            password: password.to_string(),
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            mode: ApiMode::Auto,
        })
    }

    /// Polling interval as a [`Duration`], clamped to at least one second.
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs.max(1))
    }
}

/// Normalizes a user-entered server URL.
///
/// Trims whitespace and trailing slashes and defaults the scheme to
/// `http://` when none is given, which is how most LAN installs are reached.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("  lube.local:8080/ "), "http://lube.local:8080");
        assert_eq!(
            normalize_url("https://lube.example.com///"),
            "https://lube.example.com"
        );
        assert_eq!(normalize_url("http://10.0.0.5"), "http://10.0.0.5");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert!(ConnectionConfig::new("", "u", "p").is_err());
        assert!(ConnectionConfig::new("lube.local", "", "p").is_err());
        assert!(ConnectionConfig::new("lube.local", "u", "").is_err());
        let config = ConnectionConfig::new("lube.local", "u", "p").unwrap();
        assert_eq!(config.base_url, "http://lube.local");
        assert_eq!(config.update_interval_secs, DEFAULT_UPDATE_INTERVAL_SECS);
        assert_eq!(config.mode, ApiMode::Auto);
    }

    #[test]
    fn test_api_mode_round_trip() {
        for mode in [ApiMode::Auto, ApiMode::PerVehicle, ApiMode::Flat] {
            assert_eq!(mode.as_str().parse::<ApiMode>().unwrap(), mode);
        }
        assert_eq!("per-vehicle".parse::<ApiMode>().unwrap(), ApiMode::PerVehicle);
        assert!("sideways".parse::<ApiMode>().is_err());
    }

    #[test]
    fn test_update_interval_clamp() {
        let mut config = ConnectionConfig::new("lube.local", "u", "p").unwrap();
        config.update_interval_secs = 0;
        assert_eq!(config.update_interval(), Duration::from_secs(1));
        config.update_interval_secs = 120;
        assert_eq!(config.update_interval(), Duration::from_secs(120));
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{"base_url": "http://lube.local", "username": "u", "password": "p"}"#,
        )
        .unwrap();
        assert_eq!(config.update_interval_secs, DEFAULT_UPDATE_INTERVAL_SECS);
        assert_eq!(config.mode, ApiMode::Auto);
    }
}
