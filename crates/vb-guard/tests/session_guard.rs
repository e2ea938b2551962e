//! Session guard transitions against a scripted authenticator.

mod support;

use pretty_assertions::assert_eq;
use support::{Scripted, Step, count, guard};
use vb_core::enums::UnavailablePolicy;
use vb_guard::{GuardState, LockReason, SessionSnapshot};

fn assert_exclusive(snap: &SessionSnapshot) {
    assert!(!(snap.authenticated && snap.prompt_visible), "{snap:?}");
    if !snap.initializing {
        assert!(snap.authenticated ^ snap.prompt_visible, "{snap:?}");
    }
}

#[tokio::test]
async fn disabled_security_unlocks_without_challenge() {
    let auth = Scripted::new(vec![]);
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, false);

    let snap = ctx.initialize().await;
    assert_eq!(snap.state, GuardState::Unlocked);
    assert!(snap.authenticated);
    assert!(!snap.initializing);

    let snap = ctx.authenticate().await;
    assert!(snap.authenticated);
    assert_eq!(count(&calls), 0);
}

#[tokio::test]
async fn failed_challenge_stays_locked_then_retry_unlocks() {
    let auth = Scripted::new(vec![Step::Fail("cancelled"), Step::Pass]);
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    let snap = ctx.initialize().await;
    assert_exclusive(&snap);
    assert!(snap.prompt_visible);
    assert_eq!(
        snap.state,
        GuardState::Locked {
            reason: LockReason::ChallengeFailed {
                detail: Some("cancelled".into())
            }
        }
    );
    assert_eq!(snap.reason().as_deref(), Some("cancelled"));

    let snap = ctx.retry().await;
    assert_exclusive(&snap);
    assert_eq!(snap.state, GuardState::Unlocked);
    assert_eq!(count(&calls), 2);
}

#[tokio::test]
async fn challenge_error_is_absorbed_as_lock() {
    let auth = Scripted::new(vec![Step::Error("sensor exploded")]);
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    let snap = ctx.initialize().await;
    assert!(snap.prompt_visible);
    let reason = snap.reason().unwrap();
    assert!(reason.contains("sensor exploded"), "{reason}");
}

#[tokio::test]
async fn no_automatic_retry() {
    let auth = Scripted::new(vec![Step::Fail("no"), Step::Pass]);
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    ctx.initialize().await;
    tokio::task::yield_now().await;
    assert_eq!(count(&calls), 1);
    assert!(ctx.snapshot().prompt_visible);
}

#[tokio::test]
async fn authenticate_while_unlocked_is_noop() {
    let auth = Scripted::new(vec![Step::Pass]);
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    ctx.initialize().await;
    let snap = ctx.authenticate().await;
    assert!(snap.authenticated);
    assert_eq!(count(&calls), 1);
}

#[tokio::test]
async fn unavailable_capability_denied_by_default() {
    let auth = Scripted::new(vec![]).without_enrollment();
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    let snap = ctx.initialize().await;
    assert_eq!(
        snap.state,
        GuardState::Locked {
            reason: LockReason::CapabilityUnavailable {
                detail: "no credential enrolled".into()
            }
        }
    );
    assert_eq!(count(&calls), 0);

    let snap = ctx.continue_without_security().await;
    assert!(snap.authenticated);
    assert!(!snap.security_enabled);
}

#[tokio::test]
async fn unavailable_capability_allowed_fails_open() {
    let auth = Scripted::new(vec![]).with_hardware(Ok(false));
    let ctx = guard(auth, UnavailablePolicy::Allow, true);

    let snap = ctx.initialize().await;
    assert_eq!(snap.state, GuardState::Unlocked);
    assert!(snap.security_enabled);
}

#[tokio::test]
async fn capability_probe_error_counts_as_unavailable() {
    let auth = Scripted::new(vec![]).with_hardware(Err("probe failed"));
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    let snap = ctx.initialize().await;
    assert!(matches!(
        snap.state,
        GuardState::Locked {
            reason: LockReason::CapabilityUnavailable { .. }
        }
    ));
}

#[tokio::test]
async fn enable_then_authenticate_challenges() {
    let auth = Scripted::new(vec![Step::Pass]);
    let calls = auth.challenge_counter();
    let ctx = guard(auth, UnavailablePolicy::Deny, false);

    ctx.initialize().await;
    let snap = ctx.enable_security().await;
    assert!(snap.prompt_visible);
    assert_eq!(count(&calls), 0);

    let snap = ctx.authenticate().await;
    assert!(snap.authenticated);
    assert_eq!(count(&calls), 1);
}

#[tokio::test]
async fn disable_security_unlocks_from_locked() {
    let auth = Scripted::new(vec![Step::Fail("no")]);
    let ctx = guard(auth, UnavailablePolicy::Deny, true);

    ctx.initialize().await;
    let snap = ctx.disable_security().await;
    assert_eq!(snap.state, GuardState::Unlocked);
    assert!(!snap.security_enabled);
    assert_exclusive(&snap);
}

#[tokio::test]
async fn lock_and_unlock_app() {
    let auth = Scripted::new(vec![Step::Pass]);
    let ctx = guard(auth, UnavailablePolicy::Deny, true);
    ctx.initialize().await;

    let snap = ctx.lock_app().await;
    assert_eq!(
        snap.state,
        GuardState::Locked {
            reason: LockReason::Manual
        }
    );

    let snap = ctx.unlock_app().await;
    assert_eq!(snap.state, GuardState::Unlocked);
}

#[tokio::test]
async fn clones_share_state() {
    let auth = Scripted::new(vec![Step::Pass]);
    let ctx = guard(auth, UnavailablePolicy::Deny, true);
    let other = ctx.clone();

    ctx.initialize().await;
    assert!(other.snapshot().authenticated);
}
