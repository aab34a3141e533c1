use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Cached presence state machine.
///
/// State transitions:
/// - NoCachedValue -> HasCachedValue(v) (first completed detection)
/// - HasCachedValue(_) -> HasCachedValue(v) (every later completed detection)
///
/// There is no way back to NoCachedValue. Failed detections leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceState {
    NoCachedValue,
    HasCachedValue(bool),
}

impl PresenceState {
    pub fn value(&self) -> Option<bool> {
        match self {
            PresenceState::NoCachedValue => None,
            PresenceState::HasCachedValue(present) => Some(*present),
        }
    }
}

/// Answer returned by a presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// True when a hardware keyboard should be treated as attached.
    pub present: bool,
    /// True when the answer came from the cache while a fresh probe was still running.
    pub from_cache: bool,
}

const NO_VALUE: u8 = 0;
const ABSENT: u8 = 1;
const PRESENT: u8 = 2;

impl From<u8> for PresenceState {
    fn from(value: u8) -> Self {
        match value {
            ABSENT => PresenceState::HasCachedValue(false),
            PRESENT => PresenceState::HasCachedValue(true),
            _ => PresenceState::NoCachedValue,
        }
    }
}

fn encode(present: bool) -> u8 {
    if present {
        PRESENT
    } else {
        ABSENT
    }
}

/// Lock-free slot holding the result of the most recently completed detection.
///
/// Writers race freely: whichever detection finishes last wins, regardless of
/// which one was started first.
#[derive(Debug)]
pub struct CachedPresence(AtomicU8);

impl CachedPresence {
    pub fn new() -> Self {
        Self(AtomicU8::new(NO_VALUE))
    }

    pub fn state(&self) -> PresenceState {
        self.0.load(Ordering::Acquire).into()
    }

    pub fn get(&self) -> Option<bool> {
        self.state().value()
    }

    /// Overwrite the cached value, returning the previous state.
    pub fn store(&self, present: bool) -> PresenceState {
        self.0.swap(encode(present), Ordering::AcqRel).into()
    }
}

impl Default for CachedPresence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_without_value() {
        let cache = CachedPresence::new();
        assert_eq!(cache.state(), PresenceState::NoCachedValue);
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_store_overwrites_and_reports_previous() {
        let cache = CachedPresence::new();

        assert_eq!(cache.store(false), PresenceState::NoCachedValue);
        assert_eq!(cache.get(), Some(false));

        assert_eq!(cache.store(true), PresenceState::HasCachedValue(false));
        assert_eq!(cache.state(), PresenceState::HasCachedValue(true));
    }
}
