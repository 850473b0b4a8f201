use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use crate::row::ThemeId;

pub const DEFAULT_LOG_FILTER: &str = "message_row=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeId,
    /// Show the unread separator above the first unread incoming message
    pub show_unread_separator: bool,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeId::Dark,
            show_unread_separator: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from("com", "message-row", "message-row").ok_or(ConfigError::NoConfigDir)?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("settings.json"))
}

/// Load settings, falling back to defaults when missing or unreadable.
pub fn load_settings() -> Settings {
    match settings_path().and_then(|path| read_settings(&path)) {
        Ok(settings) => settings,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            warn!(error = %e, "using default settings");
            Settings::default()
        }
    }
}

pub fn read_settings(path: &std::path::Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    write_settings(&settings_path()?, settings)
}

pub fn write_settings(path: &std::path::Path, settings: &Settings) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
