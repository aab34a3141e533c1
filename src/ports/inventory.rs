use crate::domain::{DetectionError, DeviceSnapshot};

/// Port for the platform device inventory.
///
/// Implementations list the keyboard-class devices currently known to the
/// system. Queries are blocking and are always run off the async executor.
pub trait KeyboardInventory: Send + Sync {
    /// List the keyboard-class devices present right now.
    fn list_keyboards(&self) -> Result<DeviceSnapshot, DetectionError>;
}
