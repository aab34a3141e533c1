use evdev::{Device, EventType};
use tracing::debug;

use crate::domain::{DetectionError, DeviceCapabilities, DeviceSnapshot, KeyboardDevice};
use crate::ports::KeyboardInventory;

/// Linux inventory over the evdev nodes in `/dev/input`.
///
/// Nodes the process cannot open are skipped by `evdev::enumerate`. When none
/// can be opened at all the query fails rather than reporting "no keyboard",
/// since that usually means missing `input` group membership.
#[derive(Debug, Clone, Default)]
pub struct EvdevKeyboardInventory;

impl EvdevKeyboardInventory {
    pub fn new() -> Self {
        Self
    }

    fn capabilities(device: &Device) -> DeviceCapabilities {
        let has_ev_key = device.supported_events().contains(EventType::KEY);
        let keys = device
            .supported_keys()
            .map(|keys| keys.iter().map(|key| key.code()).collect::<Vec<_>>())
            .unwrap_or_default();
        DeviceCapabilities::new(has_ev_key, keys)
    }
}

impl KeyboardInventory for EvdevKeyboardInventory {
    fn list_keyboards(&self) -> Result<DeviceSnapshot, DetectionError> {
        let mut opened = 0usize;
        let mut keyboards = Vec::new();

        for (path, device) in evdev::enumerate() {
            opened += 1;
            if !Self::capabilities(&device).is_keyboard() {
                continue;
            }

            let keyboard = KeyboardDevice {
                description: device.name().map(str::to_string),
                device_id: None,
            };
            keyboards.push(keyboard.with_device_id(path.display().to_string()));
        }

        if opened == 0 {
            return Err(DetectionError::InventoryQueryFailure(
                "No readable input devices under /dev/input".to_string(),
            ));
        }

        debug!(
            devices = opened,
            keyboards = keyboards.len(),
            "Enumerated evdev devices"
        );
        Ok(DeviceSnapshot::new(keyboards))
    }
}
