use async_trait::async_trait;

use crate::domain::{Detection, DetectionError, PresenceState};

/// Port for hardware keyboard presence detection.
#[async_trait]
pub trait PresenceDetector: Send + Sync {
    /// Start a fresh detection.
    ///
    /// If a result is already cached it is returned right away while the new
    /// probe keeps running in the background and refreshes the cache when done.
    /// Otherwise this waits for the probe and returns its result.
    async fn detect(&self) -> Result<Detection, DetectionError>;

    /// Last completed detection result, without probing.
    fn state(&self) -> PresenceState;
}
