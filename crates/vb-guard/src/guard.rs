//! The session guard state machine.
//!
//! ```text
//! Initializing ──disabled──────────────▶ Unlocked
//!      │                                   ▲   │
//!      └─enabled─▶ Locked ──challenge ok───┘   │ background / inactive
//!                   ▲  │                       │ lock_app
//!                   │  └─challenge failed──┐   │
//!                   └──────────────────────┴───┘
//! ```
//!
//! Every transition happens under one `tokio::sync::Mutex` and is published
//! on a `watch` channel. Capability checks and challenges never return an
//! error to the caller; they resolve to a state plus an optional reason.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};
use vb_core::enums::UnavailablePolicy;

use crate::authenticator::Authenticator;
use crate::lifecycle::{LifecycleEvent, LifecycleNotifier, LifecycleSubscription};
use crate::state::{GuardState, LockReason, SessionSnapshot};

/// Text handed to the platform challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePrompt {
    pub message: String,
    pub cancel_label: String,
}

impl ChallengePrompt {
    pub fn new(message: impl Into<String>, cancel_label: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cancel_label: cancel_label.into(),
        }
    }
}

impl Default for ChallengePrompt {
    fn default() -> Self {
        Self::new("Authenticate to access Vaultbook", "Cancel")
    }
}

struct GuardInner<A> {
    authenticator: A,
    policy: UnavailablePolicy,
    prompt: ChallengePrompt,
    state: GuardState,
    security_enabled: bool,
}

/// Shared handle to the process-wide session guard.
///
/// Cloning is cheap; all clones drive the same state machine.
pub struct SecurityContext<A> {
    inner: Arc<Mutex<GuardInner<A>>>,
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl<A> Clone for SecurityContext<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<A: Authenticator> SecurityContext<A> {
    /// Create a guard in `Initializing` with the persisted security intent.
    pub fn new(
        authenticator: A,
        policy: UnavailablePolicy,
        prompt: ChallengePrompt,
        security_enabled: bool,
    ) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::new(
            GuardState::Initializing,
            security_enabled,
        ));
        Self {
            inner: Arc::new(Mutex::new(GuardInner {
                authenticator,
                policy,
                prompt,
                state: GuardState::Initializing,
                security_enabled,
            })),
            tx: Arc::new(tx),
        }
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified after every transition.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Run the first evaluation. Later calls return the current snapshot.
    pub async fn initialize(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        if inner.state != GuardState::Initializing {
            return self.snapshot();
        }
        debug!(security_enabled = inner.security_enabled, "initializing session guard");
        self.authenticate_locked(&mut inner).await
    }

    /// The single challenge path.
    ///
    /// With security disabled this unlocks without touching the
    /// authenticator. While already unlocked it changes nothing.
    pub async fn authenticate(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        self.authenticate_locked(&mut inner).await
    }

    /// Re-issue the challenge after a failure or cancellation.
    pub async fn retry(&self) -> SessionSnapshot {
        debug!("challenge retry requested");
        self.authenticate().await
    }

    /// Switch security on and force the prompt.
    pub async fn enable_security(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        inner.security_enabled = true;
        self.transition(
            &mut inner,
            GuardState::Locked {
                reason: LockReason::SecurityEnabled,
            },
        )
    }

    /// Switch security off and unlock, from any state.
    pub async fn disable_security(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        inner.security_enabled = false;
        self.transition(&mut inner, GuardState::Unlocked)
    }

    /// Accept the security recommendation's "continue anyway" choice.
    pub async fn continue_without_security(&self) -> SessionSnapshot {
        warn!("continuing without security; the vault is no longer gated");
        self.disable_security().await
    }

    /// Lock an unlocked session on demand. No-op in any other state.
    pub async fn lock_app(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        if inner.state != GuardState::Unlocked {
            return self.snapshot();
        }
        self.transition(
            &mut inner,
            GuardState::Locked {
                reason: LockReason::Manual,
            },
        )
    }

    /// Administrative unlock without a challenge.
    pub async fn unlock_app(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        self.transition(&mut inner, GuardState::Unlocked)
    }

    /// Apply one host lifecycle event.
    pub async fn handle_lifecycle(&self, event: LifecycleEvent) -> SessionSnapshot {
        let mut inner = self.inner.lock().await;
        debug!(?event, state = %inner.state, "lifecycle event");
        let relock = event.leaves_foreground()
            && inner.security_enabled
            && inner.state == GuardState::Unlocked;
        if !relock {
            return self.snapshot();
        }
        self.transition(
            &mut inner,
            GuardState::Locked {
                reason: LockReason::Lifecycle,
            },
        )
    }

    /// Listen to `notifier` until the returned handle is released.
    #[must_use]
    pub fn subscribe(&self, notifier: &LifecycleNotifier) -> LifecycleSubscription {
        let mut rx = notifier.receiver();
        let guard = self.clone();
        let handle = tokio::spawn(async move {
            use tokio::sync::broadcast::error::RecvError;
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        guard.handle_lifecycle(event).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "lifecycle listener lagged; events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        LifecycleSubscription::new(handle)
    }

    async fn authenticate_locked(&self, inner: &mut GuardInner<A>) -> SessionSnapshot {
        if !inner.security_enabled {
            return self.transition(inner, GuardState::Unlocked);
        }
        if inner.state == GuardState::Unlocked {
            return self.snapshot();
        }

        if let Err(detail) = inner.capability().await {
            return match inner.policy {
                UnavailablePolicy::Deny => self.transition(
                    inner,
                    GuardState::Locked {
                        reason: LockReason::CapabilityUnavailable { detail },
                    },
                ),
                UnavailablePolicy::Allow => {
                    warn!(%detail, "security check unavailable; allowing access");
                    self.transition(inner, GuardState::Unlocked)
                }
            };
        }

        if inner.state == GuardState::Initializing {
            self.transition(
                inner,
                GuardState::Locked {
                    reason: LockReason::Startup,
                },
            );
        }

        let outcome = inner
            .authenticator
            .challenge(&inner.prompt.message, &inner.prompt.cancel_label)
            .await;
        let next = match outcome {
            Ok(outcome) if outcome.success => GuardState::Unlocked,
            Ok(outcome) => GuardState::Locked {
                reason: LockReason::ChallengeFailed {
                    detail: outcome.error_reason,
                },
            },
            Err(error) => GuardState::Locked {
                reason: LockReason::ChallengeFailed {
                    detail: Some(error.to_string()),
                },
            },
        };
        self.transition(inner, next)
    }

    fn transition(&self, inner: &mut GuardInner<A>, next: GuardState) -> SessionSnapshot {
        if inner.state != next {
            info!(from = %inner.state, to = %next, reason = ?next.lock_reason(), "session transition");
        }
        inner.state = next;
        let snapshot = SessionSnapshot::new(inner.state.clone(), inner.security_enabled);
        self.tx.send_replace(snapshot.clone());
        snapshot
    }
}

impl<A: Authenticator> GuardInner<A> {
    /// `Err(detail)` when no challenge can be run.
    async fn capability(&self) -> Result<(), String> {
        match self.authenticator.has_hardware().await {
            Ok(true) => {}
            Ok(false) => return Err("no credential backend available".to_string()),
            Err(error) => return Err(error.to_string()),
        }
        match self.authenticator.is_enrolled().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("no credential enrolled".to_string()),
            Err(error) => Err(error.to_string()),
        }
    }
}
