pub mod config_store;
#[cfg(target_os = "linux")]
pub mod evdev_inventory;
pub mod fixed_inventory;
pub mod keyboard_detector;
pub mod platform;
pub mod wmic_inventory;

pub use config_store::TomlConfigStore;
#[cfg(target_os = "linux")]
pub use evdev_inventory::EvdevKeyboardInventory;
pub use fixed_inventory::FixedKeyboardInventory;
pub use keyboard_detector::KeyboardPresenceDetector;
pub use platform::platform_inventory;
pub use wmic_inventory::WmicKeyboardInventory;
