//! The session gate run before any vault data is touched.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, bail};
use vb_guard::{LockReason, SessionSnapshot};

use crate::context::AppContext;

const CAPABILITY_HINT: &str =
    "run `vbk security enroll` to set a passphrase or `vbk security disable` to turn security off";

/// Initialize the guard and keep offering a retry while a failed challenge
/// leaves the session locked. Retries happen only when the operator asks.
pub async fn require_unlocked(ctx: &AppContext) -> anyhow::Result<SessionSnapshot> {
    let mut snapshot = ctx.security.initialize().await;
    loop {
        if snapshot.authenticated {
            return Ok(snapshot);
        }
        let Some(reason) = snapshot.state.lock_reason() else {
            bail!("session guard is {}", snapshot.state);
        };
        let message = reason.message().unwrap_or_else(|| "locked".to_string());
        if !reason.is_retryable() {
            bail!("vault locked: {message}; {CAPABILITY_HINT}");
        }
        if !confirm_retry(&message).await? {
            bail!("vault locked: {message}");
        }
        snapshot = ctx.security.retry().await;
    }
}

/// Whether the guard is locked only because no challenge can run.
#[must_use]
pub fn capability_missing(snapshot: &SessionSnapshot) -> bool {
    matches!(
        snapshot.state.lock_reason(),
        Some(LockReason::CapabilityUnavailable { .. })
    )
}

async fn confirm_retry(message: &str) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let question = format!("vault locked ({message}). Retry? [y/N] ");
    tokio::task::spawn_blocking(move || -> std::io::Result<bool> {
        let mut stderr = std::io::stderr();
        stderr.write_all(question.as_bytes())?;
        stderr.flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    })
    .await
    .context("retry prompt task failed")?
    .context("failed to read retry answer")
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use vb_guard::GuardState;

    use super::*;

    #[test]
    fn only_explicit_yes_retries() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn capability_missing_matches_only_that_reason() {
        let missing = SessionSnapshot::new(
            GuardState::Locked {
                reason: LockReason::CapabilityUnavailable {
                    detail: "no credential enrolled".into(),
                },
            },
            true,
        );
        assert!(capability_missing(&missing));

        let failed = SessionSnapshot::new(
            GuardState::Locked {
                reason: LockReason::ChallengeFailed { detail: None },
            },
            true,
        );
        assert!(!capability_missing(&failed));
        assert!(!capability_missing(&SessionSnapshot::new(
            GuardState::Unlocked,
            true
        )));
    }
}
