use std::sync::Arc;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
use tracing::warn;

use crate::ports::KeyboardInventory;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
use crate::domain::{DetectionError, DeviceSnapshot};

/// The device inventory for the platform this binary was built for.
#[cfg(target_os = "windows")]
pub fn platform_inventory() -> Arc<dyn KeyboardInventory> {
    Arc::new(super::WmicKeyboardInventory::new())
}

/// The device inventory for the platform this binary was built for.
#[cfg(target_os = "linux")]
pub fn platform_inventory() -> Arc<dyn KeyboardInventory> {
    Arc::new(super::EvdevKeyboardInventory::new())
}

/// The device inventory for the platform this binary was built for.
#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub fn platform_inventory() -> Arc<dyn KeyboardInventory> {
    warn!("Keyboard enumeration not supported on this platform");
    Arc::new(UnsupportedInventory)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
struct UnsupportedInventory;

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
impl KeyboardInventory for UnsupportedInventory {
    fn list_keyboards(&self) -> Result<DeviceSnapshot, DetectionError> {
        Err(DetectionError::InventoryQueryFailure(format!(
            "No keyboard inventory for {}",
            std::env::consts::OS
        )))
    }
}
