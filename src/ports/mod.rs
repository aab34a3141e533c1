pub mod config;
pub mod inventory;
pub mod presence;

pub use config::ConfigStore;
pub use inventory::KeyboardInventory;
pub use presence::PresenceDetector;
