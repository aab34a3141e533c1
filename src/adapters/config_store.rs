use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DetectionError};
use crate::ports::ConfigStore;

const APP_DIR: &str = "KeyboardPresence";

/// TOML-based configuration store with OS-specific paths.
pub struct TomlConfigStore {
    config_dir: PathBuf,
    logs_dir: PathBuf,
}

impl TomlConfigStore {
    /// Create a store in the OS-specific configuration directory.
    /// - Windows: %APPDATA%\KeyboardPresence\
    /// - Linux: ~/.config/KeyboardPresence/
    /// - macOS: ~/Library/Application Support/KeyboardPresence/
    pub fn new() -> Result<Self, DetectionError> {
        let config_dir = dirs::config_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or_else(|| {
                DetectionError::Config("Could not find configuration directory".to_string())
            })?;

        let logs_dir = dirs::data_local_dir()
            .map(|p| p.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));

        Self::with_dirs(config_dir, logs_dir)
    }

    /// Create a store rooted at explicit directories.
    pub fn with_dirs(config_dir: PathBuf, logs_dir: PathBuf) -> Result<Self, DetectionError> {
        fs::create_dir_all(&config_dir)?;

        info!(config_dir = ?config_dir, "ConfigStore initialized");

        Ok(Self {
            config_dir,
            logs_dir,
        })
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DetectionError> {
        let config_path = self.config_path();

        if config_path.exists() {
            debug!(path = ?config_path, "Loading configuration");
            let content = fs::read_to_string(&config_path)?;
            let config: AppConfig = toml::from_str(&content)?;
            info!(path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!(path = ?config_path, "Configuration file not found, creating default");
            let config = AppConfig::new();
            self.save(&config)?;
            Ok(config)
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DetectionError> {
        let config_path = self.config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&config_path, content)?;

        info!(path = ?config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    fn logs_dir(&self) -> PathBuf {
        self.logs_dir.clone()
    }
}
