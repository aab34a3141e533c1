pub mod capabilities;
pub mod config;
pub mod device;
pub mod error;
pub mod policy;
pub mod presence;

pub use capabilities::DeviceCapabilities;
pub use config::{AppConfig, DetectorConfig, LoggingConfig, PopupConfig};
pub use device::{evaluate_snapshot, DeviceSnapshot, KeyboardDevice};
pub use error::DetectionError;
pub use policy::{FailurePolicy, IgnorePolicy, PopupOptions};
pub use presence::{CachedPresence, Detection, PresenceState};
