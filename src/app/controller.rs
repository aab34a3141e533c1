use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{platform_inventory, KeyboardPresenceDetector, TomlConfigStore};
use crate::domain::{AppConfig, DetectionError, IgnorePolicy, LoggingConfig, PopupConfig};
use crate::infrastructure::init_logging;
use crate::ports::{ConfigStore, KeyboardInventory, PresenceDetector};

/// Outcome of a presence check, as handed to the popup trigger.
#[derive(Debug, Clone, Serialize)]
pub struct PresenceReport {
    pub keyboard_present: bool,
    pub popup_allowed: bool,
    pub ignore_policy: IgnorePolicy,
    pub from_cache: bool,
}

/// Configuration sections owned by the controller.
///
/// The detector section lives only in the detector, so changes made through
/// [`AppController::detector`] are never shadowed by a stale copy.
struct HostSettings {
    logging: LoggingConfig,
    popup: PopupConfig,
}

/// Application controller that wires configuration, logging and detection.
pub struct AppController {
    settings: RwLock<HostSettings>,
    config_store: Arc<dyn ConfigStore>,
    detector: KeyboardPresenceDetector,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize from the on-disk configuration with the platform inventory.
    pub fn new() -> Result<Self, DetectionError> {
        // Step 1: Initialize config store
        let config_store = Arc::new(TomlConfigStore::new()?);

        // Step 2: Load configuration
        let config = config_store.load()?;

        // Step 3: Initialize logging
        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        info!("Keyboard presence detector starting up");

        let mut controller = Self::with_parts(config_store, platform_inventory(), config);
        controller._log_guard = log_guard;
        Ok(controller)
    }

    /// Build a controller from explicit parts, without touching logging.
    pub fn with_parts(
        config_store: Arc<dyn ConfigStore>,
        inventory: Arc<dyn KeyboardInventory>,
        config: AppConfig,
    ) -> Self {
        let detector = KeyboardPresenceDetector::new(inventory, config.detector);

        Self {
            settings: RwLock::new(HostSettings {
                logging: config.logging,
                popup: config.popup,
            }),
            config_store,
            detector,
            _log_guard: None,
        }
    }

    fn assemble(&self, settings: &HostSettings) -> AppConfig {
        AppConfig {
            detector: self.detector.config(),
            logging: settings.logging.clone(),
            popup: settings.popup.clone(),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.assemble(&self.settings.read())
    }

    /// Persist a new configuration and hand its detector section to the detector.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DetectionError> {
        let mut settings = self.settings.write();
        self.config_store.save(&config)?;

        self.detector.update_config(config.detector);
        settings.logging = config.logging;
        settings.popup = config.popup;

        info!("Configuration updated");
        Ok(())
    }

    /// Add a keyboard description to the ignore list and persist the result.
    pub fn ignore_keyboard(&self, description: &str) -> Result<bool, DetectionError> {
        let settings = self.settings.write();
        if !self.detector.add_ignored_description(description) {
            return Ok(false);
        }

        if let Err(err) = self.config_store.save(&self.assemble(&settings)) {
            self.detector.remove_ignored_description(description);
            return Err(err);
        }

        info!(description, "Keyboard added to ignore list");
        Ok(true)
    }

    pub fn detector(&self) -> &KeyboardPresenceDetector {
        &self.detector
    }

    /// Check for a hardware keyboard, applying the configured failure policy.
    pub async fn check_keyboard(&self) -> Result<bool, DetectionError> {
        self.detector.check_presence_with_fallback().await
    }

    /// Whether the on-screen keyboard may pop up right now.
    pub async fn should_show_popup(&self) -> Result<bool, DetectionError> {
        let present = self.check_keyboard().await?;
        Ok(self.settings.read().popup.options.allows_popup(present))
    }

    /// Run a check and describe the result.
    pub async fn report(&self) -> Result<PresenceReport, DetectionError> {
        let detection = match self.detector.detect().await {
            Ok(detection) => detection,
            Err(err) => self.detector.fallback(err)?,
        };

        Ok(PresenceReport {
            keyboard_present: detection.present,
            popup_allowed: self.settings.read().popup.options.allows_popup(detection.present),
            ignore_policy: self.detector.config().ignore_policy,
            from_cache: detection.from_cache,
        })
    }

    /// Get the config file path.
    pub fn config_path(&self) -> String {
        self.config_store.config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedKeyboardInventory;
    use crate::domain::{FailurePolicy, PopupOptions};
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn controller(
        name: &str,
        inventory: Arc<FixedKeyboardInventory>,
        config: AppConfig,
    ) -> (AppController, PathBuf) {
        let temp_dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&temp_dir);
        let store =
            Arc::new(TomlConfigStore::with_dirs(temp_dir.clone(), temp_dir.join("logs")).unwrap());
        (AppController::with_parts(store, inventory, config), temp_dir)
    }

    #[tokio::test]
    async fn test_ghost_keyboard_allows_popup() {
        let inventory = Arc::new(FixedKeyboardInventory::with_descriptions(["Ghost KB"]));
        let mut config = AppConfig::new();
        config.detector.ignore_policy = IgnorePolicy::IgnoreIfSingleInstanceOnList;
        let (controller, temp_dir) = controller("keyboard_presence_ctl_ghost", inventory, config);

        assert!(!controller.should_show_popup().await.unwrap());

        assert!(controller.ignore_keyboard("Ghost KB").unwrap());
        assert!(!controller.ignore_keyboard("Ghost KB").unwrap());
        assert!(!controller.detector().refresh().await.unwrap());

        let report = controller.report().await.unwrap();
        assert!(!report.keyboard_present);
        assert!(report.popup_allowed);
        assert!(report.from_cache);

        let saved = fs::read_to_string(controller.config_path()).unwrap();
        assert!(saved.contains("Ghost KB"));

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[tokio::test]
    async fn test_popup_disabled_by_options() {
        let inventory = Arc::new(FixedKeyboardInventory::default());
        let mut config = AppConfig::new();
        config.popup.options = PopupOptions::NoPopupOnTap;
        let (controller, temp_dir) = controller("keyboard_presence_ctl_nopopup", inventory, config);

        assert!(!controller.check_keyboard().await.unwrap());
        assert!(!controller.should_show_popup().await.unwrap());

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[tokio::test]
    async fn test_report_uses_failure_policy() {
        let inventory = Arc::new(FixedKeyboardInventory::default());
        inventory.set_failure(Some("WMI unavailable".to_string()));
        let (controller, temp_dir) =
            controller("keyboard_presence_ctl_failure", inventory, AppConfig::new());

        assert!(controller.report().await.is_err());

        let mut config = controller.config();
        config.detector.on_failure = FailurePolicy::AssumeAbsent;
        controller.update_config(config).unwrap();

        let report = controller.report().await.unwrap();
        assert!(!report.keyboard_present);
        assert!(report.popup_allowed);
        assert!(!report.from_cache);

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[tokio::test]
    async fn test_detector_changes_are_not_shadowed() {
        let inventory = Arc::new(FixedKeyboardInventory::with_descriptions(["USB Keyboard"]));
        let (controller, temp_dir) =
            controller("keyboard_presence_ctl_shared", inventory, AppConfig::new());

        controller.detector().set_ignore_policy(IgnorePolicy::IgnoreAll);

        let report = controller.report().await.unwrap();
        assert_eq!(report.ignore_policy, IgnorePolicy::IgnoreAll);
        assert!(!report.keyboard_present);

        assert!(controller.ignore_keyboard("Other").unwrap());
        assert_eq!(
            controller.detector().config().ignore_policy,
            IgnorePolicy::IgnoreAll
        );
        assert!(!controller.detector().refresh().await.unwrap());

        let config = controller.config();
        assert_eq!(config.detector.ignore_policy, IgnorePolicy::IgnoreAll);
        assert_eq!(config.detector.ignored_descriptions, vec!["Other".to_string()]);

        let saved = fs::read_to_string(controller.config_path()).unwrap();
        assert!(saved.contains("ignore_all"));

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_concurrent_ignores_are_all_kept() {
        let inventory = Arc::new(FixedKeyboardInventory::default());
        let (controller, temp_dir) =
            controller("keyboard_presence_ctl_concurrent", inventory, AppConfig::new());

        std::thread::scope(|scope| {
            for i in 0..8 {
                let controller = &controller;
                scope.spawn(move || {
                    assert!(controller.ignore_keyboard(&format!("Ghost KB {i}")).unwrap());
                });
            }
        });

        let ignored = controller.config().detector.ignored_descriptions;
        assert_eq!(ignored.len(), 8);
        for i in 0..8 {
            assert!(ignored.contains(&format!("Ghost KB {i}")));
        }

        let saved = fs::read_to_string(controller.config_path()).unwrap();
        let persisted: AppConfig = toml::from_str(&saved).unwrap();
        assert_eq!(persisted.detector.ignored_descriptions.len(), 8);

        let _ = fs::remove_dir_all(&temp_dir);
    }
}
