#![forbid(unsafe_code)]

//! Decide whether a hardware keyboard is attached, so an on-screen keyboard
//! popup can be suppressed when one is.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use anyhow::Context;

#[cfg(target_os = "linux")]
pub use adapters::EvdevKeyboardInventory;
pub use adapters::{
    platform_inventory, FixedKeyboardInventory, KeyboardPresenceDetector, TomlConfigStore,
    WmicKeyboardInventory,
};
pub use app::{AppController, PresenceReport};
pub use domain::{
    Detection, DetectionError, DetectorConfig, DeviceSnapshot, FailurePolicy, IgnorePolicy,
    KeyboardDevice, PopupOptions, PresenceState,
};
pub use ports::{KeyboardInventory, PresenceDetector};

/// Run one check against the real device inventory and print the report as JSON.
pub async fn run() -> anyhow::Result<()> {
    let controller = AppController::new().context("Failed to initialize application")?;
    let report = controller
        .report()
        .await
        .context("Keyboard presence check failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
