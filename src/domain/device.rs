use serde::{Deserialize, Serialize};

use super::config::DetectorConfig;
use super::error::DetectionError;
use super::policy::IgnorePolicy;

/// One keyboard-class record reported by a device inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardDevice {
    /// Human-readable description, e.g. "Standard PS/2 Keyboard".
    /// `None` when the inventory returned a record without one.
    pub description: Option<String>,
    /// Platform identifier, if the inventory exposes one.
    pub device_id: Option<String>,
}

impl KeyboardDevice {
    /// Create a device record with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            device_id: None,
        }
    }

    /// Attach a platform identifier.
    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

/// Keyboard-class devices present at the moment of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub devices: Vec<KeyboardDevice>,
}

impl DeviceSnapshot {
    pub fn new(devices: Vec<KeyboardDevice>) -> Self {
        Self { devices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl FromIterator<KeyboardDevice> for DeviceSnapshot {
    fn from_iter<I: IntoIterator<Item = KeyboardDevice>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Decide whether a hardware keyboard counts as present.
///
/// Zero devices is always absent and two or more is always present.
/// A single device is judged by the configured [`IgnorePolicy`].
pub fn evaluate_snapshot(
    snapshot: &DeviceSnapshot,
    config: &DetectorConfig,
) -> Result<bool, DetectionError> {
    let device = match snapshot.devices.as_slice() {
        [] => return Ok(false),
        [only] => only,
        _ => return Ok(true),
    };

    match config.ignore_policy {
        IgnorePolicy::IgnoreAll | IgnorePolicy::IgnoreIfSingleInstance => Ok(false),
        IgnorePolicy::IgnoreIfSingleInstanceOnList => {
            let description = device.description.as_deref().ok_or(
                DetectionError::MalformedDeviceRecord {
                    index: 0,
                    field: "Description",
                },
            )?;
            Ok(!config.is_ignored(description))
        }
        IgnorePolicy::DoNotIgnore => Ok(true),
    }
}
