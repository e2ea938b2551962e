use anyhow::{Context, bail};
use serde::Serialize;
use vb_core::enums::UnavailablePolicy;
use vb_guard::CredentialSource;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SecurityCommands;
use crate::context::{AppContext, gate};
use crate::output::output;

#[derive(Debug, Serialize)]
struct SecurityStatusResponse {
    security_enabled: bool,
    enrolled: bool,
    credential_source: Option<CredentialSource>,
    unavailable_policy: UnavailablePolicy,
    database: String,
    note: Option<String>,
}

#[derive(Debug, Serialize)]
struct EnrollResponse {
    enrolled: bool,
    credential_source: CredentialSource,
}

#[derive(Debug, Serialize)]
struct ForgetResponse {
    enrolled: bool,
    note: Option<String>,
}

/// Handle `vbk security`.
pub async fn handle(
    action: &SecurityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SecurityCommands::Status => status(ctx, flags),
        SecurityCommands::Enable => enable(ctx, flags).await,
        SecurityCommands::Disable => disable(ctx, flags).await,
        SecurityCommands::Lock => {
            gate::require_unlocked(ctx).await?;
            output(&ctx.security.lock_app().await, flags.format)
        }
        SecurityCommands::Enroll => enroll(ctx, flags).await,
        SecurityCommands::Forget => forget(ctx, flags).await,
    }
}

fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let security_enabled = ctx.security.snapshot().security_enabled;
    let credential_source = ctx.credentials.detect_source();
    let note = (security_enabled && credential_source.is_none())
        .then(|| "no passphrase enrolled; run `vbk security enroll`".to_string());
    output(
        &SecurityStatusResponse {
            security_enabled,
            enrolled: credential_source.is_some(),
            credential_source,
            unavailable_policy: ctx.config.security.unavailable_policy,
            database: ctx.db_path.display().to_string(),
            note,
        },
        flags.format,
    )
}

/// Turn security on. The intent is persisted only after a challenge passes.
async fn enable(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.credentials.detect_source().is_none() {
        bail!("no passphrase enrolled; run `vbk security enroll` first");
    }
    ctx.security.enable_security().await;
    let snapshot = ctx.security.authenticate().await;
    if !snapshot.authenticated {
        let reason = snapshot
            .reason()
            .unwrap_or_else(|| "authentication failed".to_string());
        bail!("security not enabled: {reason}");
    }
    ctx.service
        .set_security_enabled(true)
        .await
        .context("failed to persist security setting")?;
    output(&snapshot, flags.format)
}

/// Turn security off. Needs an unlocked session unless the guard is locked
/// because no challenge can run.
async fn disable(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.security.initialize().await;
    let snapshot = if gate::capability_missing(&snapshot) {
        ctx.security.continue_without_security().await
    } else {
        gate::require_unlocked(ctx).await?;
        ctx.security.disable_security().await
    };
    ctx.service
        .set_security_enabled(false)
        .await
        .context("failed to persist security setting")?;
    output(&snapshot, flags.format)
}

/// Set a new passphrase. Replacing an existing one needs an unlocked session.
async fn enroll(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if ctx.credentials.detect_source().is_some() {
        gate::require_unlocked(ctx).await?;
    }

    let (first, second) = tokio::task::spawn_blocking(|| -> std::io::Result<(String, String)> {
        let first = rpassword::prompt_password("New passphrase: ")?;
        let second = rpassword::prompt_password("Repeat passphrase: ")?;
        Ok((first, second))
    })
    .await
    .context("passphrase prompt task failed")?
    .context("failed to read passphrase")?;

    if first != second {
        bail!("passphrases do not match");
    }

    let authenticator = ctx.authenticator();
    let credential_source = tokio::task::spawn_blocking(move || authenticator.enroll(&first))
        .await
        .context("enroll task failed")??;

    output(
        &EnrollResponse {
            enrolled: true,
            credential_source,
        },
        flags.format,
    )
}

async fn forget(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    gate::require_unlocked(ctx).await?;
    ctx.authenticator().forget()?;

    let note = ctx.security.snapshot().security_enabled.then(|| {
        "security is still enabled; enroll a new passphrase or run `vbk security disable`"
            .to_string()
    });
    output(
        &ForgetResponse {
            enrolled: false,
            note,
        },
        flags.format,
    )
}
