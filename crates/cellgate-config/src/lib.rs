//! Configuration for the Cellgate bridge.
//!
//! A TOML file lists the gates and a few transport/logging knobs; `CELLGATE_*`
//! environment variables override the scalar fields. The loaded config
//! translates to `cellgate_core` device records and transport settings.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cellgate_core::{DeviceRecord, GateConfig, TransportConfig};

/// Accepted values for `log_level`.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Request timeout for actuation calls, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Default log level when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Configured gates.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            log_level: default_log_level(),
            devices: Vec::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".into()
}

/// One gate as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceEntry {
    /// Unique identifier; also seeds the accessory UUID.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Cellgate module type (reported as the accessory model).
    pub module_type: String,

    pub serial_number: String,

    /// Payload posted to the vendor on every open, as-is.
    #[serde(default)]
    pub config: GateConfig,
}

impl DeviceEntry {
    pub fn to_record(&self) -> DeviceRecord {
        DeviceRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            module_type: self.module_type.clone(),
            serial_number: self.serial_number.clone(),
            config: self.config.clone(),
        }
    }
}

impl Config {
    /// Check the invariants the rest of the workspace relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation {
                field: "log_level".into(),
                reason: format!("expected one of {}, got '{}'", LOG_LEVELS.join(", "), self.log_level),
            });
        }

        let mut seen = HashSet::new();
        for (index, device) in self.devices.iter().enumerate() {
            if device.id.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("devices[{index}].id"),
                    reason: "must not be empty".into(),
                });
            }
            if device.name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("devices[{index}].name"),
                    reason: "must not be empty".into(),
                });
            }
            if !seen.insert(device.id.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("devices[{index}].id"),
                    reason: format!("duplicate id '{}'", device.id),
                });
            }
        }

        Ok(())
    }

    /// Device records for the platform.
    pub fn device_records(&self) -> Vec<DeviceRecord> {
        self.devices.iter().map(DeviceEntry::to_record).collect()
    }

    /// HTTP transport settings.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(Duration::from_secs(self.timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cellgate", "cellgate").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cellgate");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the config from `path` + environment.
///
/// A missing file is not an error; defaults and environment still apply.
/// Environment variables override the scalar fields only.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CELLGATE_"));

    let mut config: Config = figment.extract()?;
    if let Some(devices) = read_devices(path)? {
        config.devices = devices;
    }
    config.validate()?;
    Ok(config)
}

/// The `devices` array of the config file.
#[derive(Deserialize)]
struct DeviceFile {
    #[serde(default)]
    devices: Vec<DeviceEntry>,
}

/// Read `devices` straight from the file.
///
/// Figment stores tables key-sorted; gate payloads must reach the vendor in
/// file order. `None` when the file does not exist.
fn read_devices(path: &Path) -> Result<Option<Vec<DeviceEntry>>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let file: DeviceFile = toml::from_str(&text)?;
    Ok(Some(file.devices))
}

/// Load from the canonical config path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
