use std::process::Command;

use tracing::debug;

use crate::domain::{DetectionError, DeviceSnapshot, KeyboardDevice};
use crate::ports::KeyboardInventory;

/// Windows inventory backed by the `Win32_Keyboard` WMI class, queried through `wmic`.
#[derive(Debug, Clone)]
pub struct WmicKeyboardInventory {
    program: String,
}

impl WmicKeyboardInventory {
    pub fn new() -> Self {
        Self {
            program: "wmic".to_string(),
        }
    }

    /// Use a different executable, e.g. a full path to `wmic.exe`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for WmicKeyboardInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardInventory for WmicKeyboardInventory {
    fn list_keyboards(&self) -> Result<DeviceSnapshot, DetectionError> {
        let output = Command::new(&self.program)
            .args([
                "path",
                "Win32_Keyboard",
                "get",
                "DeviceID,Description",
                "/format:list",
            ])
            .output()
            .map_err(|e| {
                DetectionError::InventoryQueryFailure(format!("Failed to run wmic: {}", e))
            })?;

        if !output.status.success() {
            return Err(DetectionError::InventoryQueryFailure(format!(
                "wmic exited with {}",
                output.status
            )));
        }

        let snapshot = parse_wmic_list(&String::from_utf8_lossy(&output.stdout));
        debug!(keyboards = snapshot.len(), "Queried Win32_Keyboard via wmic");
        Ok(snapshot)
    }
}

/// Parse `wmic ... /format:list` output.
///
/// Records are runs of `Key=Value` lines separated by blank lines. An empty
/// value is a null WMI property and maps to `None`.
pub fn parse_wmic_list(output: &str) -> DeviceSnapshot {
    let mut devices = Vec::new();
    let mut current: Option<KeyboardDevice> = None;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            devices.extend(current.take());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        let value = (!value.is_empty()).then(|| value.to_string());

        let device = current.get_or_insert(KeyboardDevice {
            description: None,
            device_id: None,
        });
        match key.trim() {
            "Description" => device.description = value,
            "DeviceID" => device.device_id = value,
            _ => {}
        }
    }
    devices.extend(current);

    DeviceSnapshot::new(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_keyboards() {
        let output = "\r\r\n\r\r\nDescription=Standard PS/2 Keyboard\r\r\nDeviceID=ACPI\\PNP0303\\4&1D401FB5&0\r\r\n\r\r\n\r\r\nDescription=HID Keyboard Device\r\r\nDeviceID=HID\\VID_046D&PID_C31C\\7&2A&0&0000\r\r\n\r\r\n";
        let snapshot = parse_wmic_list(output);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.devices[0].description.as_deref(),
            Some("Standard PS/2 Keyboard")
        );
        assert_eq!(
            snapshot.devices[1].device_id.as_deref(),
            Some("HID\\VID_046D&PID_C31C\\7&2A&0&0000")
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_wmic_list("").is_empty());
        assert!(parse_wmic_list("\r\n\r\n").is_empty());
    }

    #[test]
    fn test_null_description_is_none() {
        let snapshot = parse_wmic_list("Description=\nDeviceID=ROOT\\KB\\0000\n");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.devices[0].description, None);
        assert_eq!(snapshot.devices[0].device_id.as_deref(), Some("ROOT\\KB\\0000"));
    }

    #[test]
    fn test_missing_program_is_query_failure() {
        let inventory = WmicKeyboardInventory::with_program("definitely-not-wmic-4b1c");
        let err = inventory.list_keyboards().unwrap_err();
        assert!(matches!(err, DetectionError::InventoryQueryFailure(_)));
    }
}
