//! Main application configuration
//!
//! This module defines the primary configuration structures for the exporter,
//! including environment variable loading and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub world: WorldSettings,
    /// Server-wide metrics are skipped entirely when this is absent
    pub rcon: Option<RconSettings>,
    pub integrations: IntegrationSettings,
}

/// Exporter-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host to bind the metrics endpoint to
    pub listen_host: String,
    /// Port for the metrics endpoint
    pub listen_port: u16,
}

/// Locations of the on-disk world sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Per-player stats JSON files
    pub stats_dir: PathBuf,
    /// Per-player binary state files
    pub playerdata_dir: PathBuf,
    /// Per-player advancement JSON files
    pub advancements_dir: PathBuf,
    /// Quest tracking is enabled when this directory exists at startup
    pub betterquesting_dir: PathBuf,
}

/// RCON connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RconSettings {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Per-command timeout in seconds
    pub timeout_seconds: u64,
}

/// Optional third-party add-on integrations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationSettings {
    /// Collect dimension timings and entity counts via `forge tps` / `forge entity list`
    pub forge: bool,
    /// Collect tile-render and chunk-load statistics via `dynmap stats`
    pub dynmap: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "quarry-exporter".to_string(),
            log_level: "info".to_string(),
            listen_host: "0.0.0.0".to_string(),
            listen_port: 8000,
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self::from_root(Path::new("/data/world"))
    }
}

impl Default for RconSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25575,
            password: String::new(),
            timeout_seconds: 10,
        }
    }
}

impl WorldSettings {
    /// Derive the standard directory layout from a world root
    pub fn from_root(root: &Path) -> Self {
        Self {
            stats_dir: root.join("stats"),
            playerdata_dir: root.join("playerdata"),
            advancements_dir: root.join("advancements"),
            betterquesting_dir: root.join("betterquesting"),
        }
    }
}

impl RconSettings {
    /// Socket address string for the RCON endpoint
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the per-command timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Exporter settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.server.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.server.log_level = log_level;
        }
        if let Ok(host) = env::var("EXPORTER_HOST") {
            config.server.listen_host = host;
        }
        if let Ok(port) = env::var("EXPORTER_PORT") {
            config.server.listen_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid EXPORTER_PORT value: {}", port))?;
        }

        // World source locations
        if let Ok(root) = env::var("WORLD_DIR") {
            config.world = WorldSettings::from_root(Path::new(&root));
        }
        if let Ok(dir) = env::var("STATS_DIR") {
            config.world.stats_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("PLAYERDATA_DIR") {
            config.world.playerdata_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("ADVANCEMENTS_DIR") {
            config.world.advancements_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("BETTERQUESTING_DIR") {
            config.world.betterquesting_dir = PathBuf::from(dir);
        }

        // RCON settings: enabled only when both host and password are present
        if let (Ok(host), Ok(password)) = (env::var("RCON_HOST"), env::var("RCON_PASSWORD")) {
            let mut rcon = RconSettings {
                host,
                password,
                ..RconSettings::default()
            };
            if let Ok(port) = env::var("RCON_PORT") {
                rcon.port = port
                    .parse()
                    .map_err(|_| anyhow!("Invalid RCON_PORT value: {}", port))?;
            }
            if let Ok(timeout) = env::var("RCON_TIMEOUT_SECONDS") {
                rcon.timeout_seconds = timeout
                    .parse()
                    .map_err(|_| anyhow!("Invalid RCON_TIMEOUT_SECONDS value: {}", timeout))?;
            }
            config.rcon = Some(rcon);
        }

        // Add-on integrations
        if let Ok(forge) = env::var("FORGE_SERVER") {
            config.integrations.forge = parse_bool(&forge)
                .ok_or_else(|| anyhow!("Invalid FORGE_SERVER value: {}", forge))?;
        }
        if let Ok(dynmap) = env::var("DYNMAP_ENABLED") {
            config.integrations.dynmap = parse_bool(&dynmap)
                .ok_or_else(|| anyhow!("Invalid DYNMAP_ENABLED value: {}", dynmap))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Parse the boolean environment toggles, accepting the `True`/`False`
/// casing that server container images conventionally use
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.server.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.server.log_level)),
    }

    // Validate ports
    if config.server.listen_port == 0 {
        return Err(anyhow!("Exporter port cannot be 0"));
    }

    // Validate RCON settings when present
    if let Some(rcon) = &config.rcon {
        if rcon.host.is_empty() {
            return Err(anyhow!("RCON host cannot be empty"));
        }
        if rcon.port == 0 {
            return Err(anyhow!("RCON port cannot be 0"));
        }
        if rcon.timeout_seconds == 0 {
            return Err(anyhow!("RCON timeout must be greater than 0"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.server.listen_port, 8000);
        assert!(config.rcon.is_none());
        assert!(!config.integrations.forge);
    }

    #[test]
    fn test_world_settings_from_root() {
        let world = WorldSettings::from_root(Path::new("/srv/world"));
        assert_eq!(world.stats_dir, PathBuf::from("/srv/world/stats"));
        assert_eq!(world.playerdata_dir, PathBuf::from("/srv/world/playerdata"));
        assert_eq!(
            world.advancements_dir,
            PathBuf::from("/srv/world/advancements")
        );
        assert_eq!(
            world.betterquesting_dir,
            PathBuf::from("/srv/world/betterquesting")
        );
    }

    #[test]
    fn test_parse_bool_accepts_container_casing() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rcon = Some(RconSettings {
            host: String::new(),
            ..RconSettings::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rcon_address() {
        let rcon = RconSettings {
            host: "mc.example.com".to_string(),
            port: 25575,
            ..RconSettings::default()
        };
        assert_eq!(rcon.address(), "mc.example.com:25575");
    }
}
