use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;
use vb_config::VaultConfig;
use vb_db::service::VaultService;
use vb_guard::{
    ChallengePrompt, CredentialStore, LifecycleEvent, LifecycleNotifier, LifecycleSubscription,
    PassphraseAuthenticator, SecurityContext, TerminalPrompt,
};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: VaultService,
    pub config: VaultConfig,
    pub security: SecurityContext<PassphraseAuthenticator>,
    pub credentials: CredentialStore,
    pub db_path: PathBuf,
    notifier: LifecycleNotifier,
    subscription: LifecycleSubscription,
}

impl AppContext {
    /// Open the database, restore the persisted security intent, and start
    /// the session guard with its lifecycle subscription.
    pub async fn init(config: VaultConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = match &flags.db {
            Some(path) => PathBuf::from(path),
            None => config.general.resolved_db_path()?,
        };
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db_path_str = db_path
            .to_str()
            .context("database path is not valid UTF-8")?;
        let service = VaultService::new_local(db_path_str)
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        let security_enabled = service
            .security_enabled(config.security.enabled_by_default)
            .await
            .context("failed to read persisted security setting")?;

        let credentials = CredentialStore::new(
            config.security.keyring_service.clone(),
            config.security.resolved_credential_file(),
        );
        let security = SecurityContext::new(
            PassphraseAuthenticator::new(credentials.clone(), TerminalPrompt),
            config.security.unavailable_policy,
            ChallengePrompt::new(
                config.security.prompt_message.clone(),
                config.security.cancel_label.clone(),
            ),
            security_enabled,
        );

        let notifier = LifecycleNotifier::new();
        let subscription = security.subscribe(&notifier);
        debug!(db = %db_path.display(), security_enabled, "application context ready");

        Ok(Self {
            service,
            config,
            security,
            credentials,
            db_path,
            notifier,
            subscription,
        })
    }

    /// Seed sample rows when `general.seed_sample_data` is set. Callers run
    /// this only after the session gate has passed.
    pub async fn seed_if_configured(&self) -> anyhow::Result<()> {
        if !self.config.general.seed_sample_data {
            return Ok(());
        }
        self.service
            .seed_sample_data()
            .await
            .context("failed to seed sample data")?;
        Ok(())
    }

    /// A second authenticator over the same credential store, for enrollment.
    #[must_use]
    pub fn authenticator(&self) -> PassphraseAuthenticator {
        PassphraseAuthenticator::new(self.credentials.clone(), TerminalPrompt)
    }

    /// Leave the foreground and release the lifecycle subscription.
    ///
    /// The listener drains the `Background` event before it exits, so the
    /// guard is locked again by the time this returns.
    pub async fn shutdown(self) {
        let Self {
            notifier,
            subscription,
            ..
        } = self;
        let delivered = notifier.publish(LifecycleEvent::Background);
        debug!(delivered, "background event published");
        drop(notifier);
        subscription.join().await;
    }
}
