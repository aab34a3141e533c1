use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::domain::{
    evaluate_snapshot, CachedPresence, Detection, DetectionError, DetectorConfig, FailurePolicy,
    IgnorePolicy, PresenceState,
};
use crate::ports::{KeyboardInventory, PresenceDetector};

type ProbeResult = Result<bool, DetectionError>;

/// Detects whether a hardware keyboard is attached.
///
/// Every check starts a probe on the blocking thread pool. Once a result is
/// cached, checks answer immediately with it and the probe refreshes the cache
/// in the background. Overlapping probes are not ordered: the last one to
/// finish owns the cache. Probes are never cancelled.
pub struct KeyboardPresenceDetector {
    inventory: Arc<dyn KeyboardInventory>,
    config: RwLock<DetectorConfig>,
    cache: Arc<CachedPresence>,
}

impl KeyboardPresenceDetector {
    pub fn new(inventory: Arc<dyn KeyboardInventory>, config: DetectorConfig) -> Self {
        info!(
            ignore_policy = %config.ignore_policy,
            ignored = config.ignored_descriptions.len(),
            on_failure = ?config.on_failure,
            "KeyboardPresenceDetector initialized"
        );

        Self {
            inventory,
            config: RwLock::new(config),
            cache: Arc::new(CachedPresence::new()),
        }
    }

    /// Whether a hardware keyboard should be treated as present.
    ///
    /// Errors are returned as-is; see [`Self::check_presence_with_fallback`].
    pub async fn check_presence(&self) -> ProbeResult {
        self.detect().await.map(|detection| detection.present)
    }

    /// Like [`Self::check_presence`], but applies the configured [`FailurePolicy`].
    pub async fn check_presence_with_fallback(&self) -> ProbeResult {
        let outcome = self.check_presence().await;
        self.resolve(outcome)
    }

    /// Run a probe and wait for it, even when a cached value exists.
    pub async fn refresh(&self) -> ProbeResult {
        Self::await_probe(self.spawn_probe()).await
    }

    /// Apply the configured [`FailurePolicy`] to a detection outcome.
    pub fn resolve(&self, outcome: ProbeResult) -> ProbeResult {
        outcome.or_else(|err| self.fallback(err).map(|detection| detection.present))
    }

    /// Replace a failed detection according to the configured [`FailurePolicy`].
    ///
    /// `from_cache` is set when the answer is the cached value.
    pub fn fallback(&self, err: DetectionError) -> Result<Detection, DetectionError> {
        let policy = self.config.read().on_failure;
        let fallback = match policy {
            FailurePolicy::Propagate => None,
            FailurePolicy::AssumePresent => Some(true),
            FailurePolicy::AssumeAbsent => Some(false),
            FailurePolicy::UseCached => self.cache.get(),
        };

        match fallback {
            Some(present) => {
                warn!(error = %err, ?policy, present, "Presence check failed, using fallback");
                Ok(Detection {
                    present,
                    from_cache: policy == FailurePolicy::UseCached,
                })
            }
            None => Err(err),
        }
    }

    /// Last completed detection result.
    pub fn cached(&self) -> Option<bool> {
        self.cache.get()
    }

    pub fn config(&self) -> DetectorConfig {
        self.config.read().clone()
    }

    /// Replace the whole configuration. Probes already running keep the old one.
    pub fn update_config(&self, config: DetectorConfig) {
        *self.config.write() = config;
        info!("Detector configuration updated");
    }

    pub fn set_ignore_policy(&self, policy: IgnorePolicy) {
        let mut config = self.config.write();
        if config.ignore_policy != policy {
            info!(from = %config.ignore_policy, to = %policy, "Ignore policy changed");
            config.ignore_policy = policy;
        }
    }

    pub fn set_failure_policy(&self, policy: FailurePolicy) {
        self.config.write().on_failure = policy;
    }

    pub fn set_ignored_descriptions(&self, descriptions: Vec<String>) {
        let mut config = self.config.write();
        config.ignored_descriptions = descriptions;
        info!(ignored = ?config.ignored_descriptions, "Ignored keyboards updated");
    }

    /// Returns false if the description was already ignored.
    pub fn add_ignored_description(&self, description: impl Into<String>) -> bool {
        self.config.write().add_ignored(description)
    }

    /// Returns false if the description was not ignored.
    pub fn remove_ignored_description(&self, description: &str) -> bool {
        self.config.write().remove_ignored(description)
    }

    /// Launch a probe on the blocking pool and a detached task that stores its
    /// result. Failed probes leave the cache untouched.
    fn spawn_probe(&self) -> oneshot::Receiver<ProbeResult> {
        let inventory = Arc::clone(&self.inventory);
        let config = self.config.read().clone();
        let cache = Arc::clone(&self.cache);
        let (tx, rx) = oneshot::channel();

        let probe = tokio::task::spawn_blocking(move || {
            let snapshot = inventory.list_keyboards()?;
            debug!(
                keyboards = snapshot.len(),
                ignore_policy = %config.ignore_policy,
                "Keyboard inventory queried"
            );
            evaluate_snapshot(&snapshot, &config)
        });

        tokio::spawn(async move {
            let outcome = probe
                .await
                .unwrap_or_else(|e| Err(DetectionError::ProbeFailed(e.to_string())));

            match &outcome {
                Ok(present) => {
                    let previous = cache.store(*present);
                    if previous.value() != Some(*present) {
                        info!(present = *present, ?previous, "Keyboard presence changed");
                    }
                }
                Err(e) => warn!(error = %e, "Keyboard probe failed, cache left unchanged"),
            }

            // Nobody is waiting when a cached value was returned.
            let _ = tx.send(outcome);
        });

        rx
    }

    async fn await_probe(pending: oneshot::Receiver<ProbeResult>) -> ProbeResult {
        pending
            .await
            .map_err(|_| DetectionError::ProbeFailed("probe task dropped".to_string()))?
    }
}

#[async_trait]
impl PresenceDetector for KeyboardPresenceDetector {
    async fn detect(&self) -> Result<Detection, DetectionError> {
        let previous = self.cache.get();
        let pending = self.spawn_probe();

        if let Some(present) = previous {
            debug!(present, "Answering from cache while probe runs");
            return Ok(Detection {
                present,
                from_cache: true,
            });
        }

        let present = Self::await_probe(pending).await?;
        Ok(Detection {
            present,
            from_cache: false,
        })
    }

    fn state(&self) -> PresenceState {
        self.cache.state()
    }
}
