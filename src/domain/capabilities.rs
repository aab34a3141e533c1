use std::collections::HashSet;

// QWERTY row key codes: Q, W, E, R, T, Y
const QWERTY_CODES: &[u16] = &[16, 17, 18, 19, 20, 21];

// Representative A-Z and SPACE codes: SPACE, A, Z
const A_Z_SPACE_CODES: &[u16] = &[57, 30, 44];

/// Input capabilities reported by a Linux event device.
#[derive(Debug, Clone, Default)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events.
    pub has_ev_key: bool,
    /// Supported EV_KEY codes.
    pub supported_keys: HashSet<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys: supported_keys.into_iter().collect(),
        }
    }

    /// A keyboard supports EV_KEY, the whole QWERTY row, A, Z and SPACE.
    ///
    /// Power buttons, lid switches and media remotes report EV_KEY too,
    /// but never the letter block.
    pub fn is_keyboard(&self) -> bool {
        self.has_ev_key
            && QWERTY_CODES
                .iter()
                .chain(A_Z_SPACE_CODES)
                .all(|code| self.supported_keys.contains(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_keyboard() -> Vec<u16> {
        (1..=88).collect()
    }

    #[test]
    fn test_full_keyboard() {
        assert!(DeviceCapabilities::new(true, full_keyboard()).is_keyboard());
    }

    #[test]
    fn test_requires_ev_key() {
        assert!(!DeviceCapabilities::new(false, full_keyboard()).is_keyboard());
    }

    #[test]
    fn test_power_button_is_not_keyboard() {
        // KEY_POWER only
        assert!(!DeviceCapabilities::new(true, [116]).is_keyboard());
    }

    #[test]
    fn test_missing_space_is_not_keyboard() {
        let keys = full_keyboard().into_iter().filter(|&code| code != 57);
        assert!(!DeviceCapabilities::new(true, keys).is_keyboard());
    }
}
