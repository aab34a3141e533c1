use serde::{Deserialize, Serialize};

use super::policy::{FailurePolicy, IgnorePolicy, PopupOptions};

/// Detection configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// How a single detected keyboard is judged.
    pub ignore_policy: IgnorePolicy,
    /// Descriptions of keyboards to ignore when they are the only one.
    /// Useful for "ghost" keyboards reported by some tablets.
    pub ignored_descriptions: Vec<String>,
    /// Fallback applied by `check_presence_with_fallback` on failure.
    pub on_failure: FailurePolicy,
}

impl DetectorConfig {
    /// Exact, case-sensitive membership test against the ignore list.
    pub fn is_ignored(&self, description: &str) -> bool {
        self.ignored_descriptions.iter().any(|d| d == description)
    }

    /// Append a description, keeping order. Returns false if it was already listed.
    pub fn add_ignored(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        if self.is_ignored(&description) {
            return false;
        }
        self.ignored_descriptions.push(description);
        true
    }

    /// Remove a description. Returns false if it was not listed.
    pub fn remove_ignored(&mut self, description: &str) -> bool {
        let before = self.ignored_descriptions.len();
        self.ignored_descriptions.retain(|d| d != description);
        self.ignored_descriptions.len() != before
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
        }
    }
}

/// Popup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub options: PopupOptions,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub logging: LoggingConfig,
    pub popup: PopupConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}
