use serde::{Deserialize, Serialize};

/// Whether a lone detected keyboard should be treated as absent.
///
/// Two or more keyboards always count as present, whatever the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnorePolicy {
    /// Do not ignore any keyboard.
    #[default]
    DoNotIgnore,
    /// Ignore a single keyboard whose description is on the ignore list.
    IgnoreIfSingleInstanceOnList,
    /// Ignore a single keyboard, whatever it is.
    IgnoreIfSingleInstance,
    /// Ignore all keyboards.
    IgnoreAll,
}

impl std::fmt::Display for IgnorePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnorePolicy::DoNotIgnore => write!(f, "do_not_ignore"),
            IgnorePolicy::IgnoreIfSingleInstanceOnList => {
                write!(f, "ignore_if_single_instance_on_list")
            }
            IgnorePolicy::IgnoreIfSingleInstance => write!(f, "ignore_if_single_instance"),
            IgnorePolicy::IgnoreAll => write!(f, "ignore_all"),
        }
    }
}

/// What a caller gets back when a detection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Report a keyboard as present, so no popup is shown.
    AssumePresent,
    /// Report no keyboard, so the popup is always offered.
    AssumeAbsent,
    /// Return the last cached result, or the error if nothing is cached.
    UseCached,
}

/// Whether tapping an input field may bring up the on-screen keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupOptions {
    NoPopupOnTap,
    #[default]
    PopupOnTap,
}

impl PopupOptions {
    /// A popup is only allowed on tap when no hardware keyboard is present.
    #[must_use]
    pub fn allows_popup(&self, keyboard_present: bool) -> bool {
        matches!(self, PopupOptions::PopupOnTap) && !keyboard_present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_requires_missing_keyboard() {
        assert!(PopupOptions::PopupOnTap.allows_popup(false));
        assert!(!PopupOptions::PopupOnTap.allows_popup(true));
        assert!(!PopupOptions::NoPopupOnTap.allows_popup(false));
        assert!(!PopupOptions::NoPopupOnTap.allows_popup(true));
    }

    #[test]
    fn test_policy_display_matches_serde_names() {
        for policy in [
            IgnorePolicy::DoNotIgnore,
            IgnorePolicy::IgnoreIfSingleInstanceOnList,
            IgnorePolicy::IgnoreIfSingleInstance,
            IgnorePolicy::IgnoreAll,
        ] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{policy}\""));
        }
    }
}
