//! Boundary to the platform challenge.

use std::future::Future;

use serde::Serialize;

use crate::error::GuardError;

/// Result of one challenge. A cancelled prompt is a failure with a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeOutcome {
    pub success: bool,
    pub error_reason: Option<String>,
}

impl ChallengeOutcome {
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            error_reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error_reason: Some(reason.into()),
        }
    }
}

/// Platform capability provider and modal challenge.
///
/// Implementations may fail with `GuardError`; the session guard turns every
/// failure into a lock reason and never propagates it.
pub trait Authenticator: Send + Sync + 'static {
    /// Whether any challenge mechanism exists on this device.
    fn has_hardware(&self) -> impl Future<Output = Result<bool, GuardError>> + Send;

    /// Whether the operator has a credential enrolled for that mechanism.
    fn is_enrolled(&self) -> impl Future<Output = Result<bool, GuardError>> + Send;

    /// Show the challenge and wait for the operator.
    fn challenge(
        &self,
        prompt: &str,
        cancel_label: &str,
    ) -> impl Future<Output = Result<ChallengeOutcome, GuardError>> + Send;
}
