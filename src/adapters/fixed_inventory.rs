use parking_lot::RwLock;

use crate::domain::{DetectionError, DeviceSnapshot, KeyboardDevice};
use crate::ports::KeyboardInventory;

/// In-memory inventory with a replaceable snapshot.
///
/// Used by tests and by hosts that enumerate devices themselves.
#[derive(Debug, Default)]
pub struct FixedKeyboardInventory {
    snapshot: RwLock<DeviceSnapshot>,
    failure: RwLock<Option<String>>,
}

impl FixedKeyboardInventory {
    pub fn new(snapshot: DeviceSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            failure: RwLock::new(None),
        }
    }

    /// Inventory reporting the given device descriptions.
    pub fn with_descriptions<I, S>(descriptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(descriptions.into_iter().map(KeyboardDevice::new).collect())
    }

    pub fn set_snapshot(&self, snapshot: DeviceSnapshot) {
        *self.snapshot.write() = snapshot;
    }

    /// Make every following query fail with `message`, or succeed again with `None`.
    pub fn set_failure(&self, message: Option<String>) {
        *self.failure.write() = message;
    }
}

impl KeyboardInventory for FixedKeyboardInventory {
    fn list_keyboards(&self) -> Result<DeviceSnapshot, DetectionError> {
        if let Some(message) = self.failure.read().as_ref() {
            return Err(DetectionError::InventoryQueryFailure(message.clone()));
        }
        Ok(self.snapshot.read().clone())
    }
}
