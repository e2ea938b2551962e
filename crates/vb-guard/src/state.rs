//! Session state and the boolean views derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the session is locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockReason {
    /// First evaluation after start, challenge pending.
    Startup,
    /// The challenge failed, was cancelled, or errored.
    ChallengeFailed { detail: Option<String> },
    /// No challenge mechanism or nothing enrolled, and policy denies access.
    CapabilityUnavailable { detail: String },
    /// The host moved to the background or became inactive.
    Lifecycle,
    /// `lock_app` was called.
    Manual,
    /// Security was just switched on.
    SecurityEnabled,
}

impl LockReason {
    /// Human-readable reason, if there is one worth showing.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Startup => None,
            Self::ChallengeFailed { detail } => Some(
                detail
                    .clone()
                    .unwrap_or_else(|| "authentication failed".to_string()),
            ),
            Self::CapabilityUnavailable { detail } => Some(format!(
                "security check unavailable: {detail}"
            )),
            Self::Lifecycle => Some("locked while in background".to_string()),
            Self::Manual => Some("locked on request".to_string()),
            Self::SecurityEnabled => Some("security enabled".to_string()),
        }
    }

    /// Whether an operator-triggered retry makes sense.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::CapabilityUnavailable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    Initializing,
    Locked { reason: LockReason },
    Unlocked,
}

impl GuardState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Locked { .. } => "locked",
            Self::Unlocked => "unlocked",
        }
    }

    #[must_use]
    pub const fn lock_reason(&self) -> Option<&LockReason> {
        match self {
            Self::Locked { reason } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view published after every transition.
///
/// `authenticated` and `prompt_visible` are derived from `state`, so they
/// can never both be true, and once `initializing` is false exactly one holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: GuardState,
    pub security_enabled: bool,
    pub authenticated: bool,
    pub prompt_visible: bool,
    pub initializing: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn new(state: GuardState, security_enabled: bool) -> Self {
        let (authenticated, prompt_visible, initializing) = match state {
            GuardState::Initializing => (false, false, true),
            GuardState::Locked { .. } => (false, true, false),
            GuardState::Unlocked => (true, false, false),
        };
        Self {
            state,
            security_enabled,
            authenticated,
            prompt_visible,
            initializing,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.state.lock_reason().and_then(LockReason::message)
    }
}
