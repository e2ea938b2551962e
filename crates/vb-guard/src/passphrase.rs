//! Passphrase challenge: the device-credential authenticator for terminals.

use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::authenticator::{Authenticator, ChallengeOutcome};
use crate::credential_store::{CredentialSource, CredentialStore};
use crate::error::GuardError;

/// Source of operator input for the challenge.
///
/// Called on a blocking thread. `Ok(None)` means the operator cancelled.
pub trait PassphrasePrompt: Send + Sync + 'static {
    /// # Errors
    ///
    /// Returns `GuardError::Prompt` if input cannot be read.
    fn read_passphrase(&self, message: &str, cancel_label: &str) -> Result<Option<String>, GuardError>;
}

/// Hidden-input prompt on the controlling terminal. Empty input cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl PassphrasePrompt for TerminalPrompt {
    fn read_passphrase(&self, message: &str, cancel_label: &str) -> Result<Option<String>, GuardError> {
        let input = rpassword::prompt_password(format!("{message} (empty to {cancel_label}): "))
            .map_err(|e| GuardError::Prompt(e.to_string()))?;
        Ok(Some(input).filter(|s| !s.is_empty()))
    }
}

/// Hash a passphrase into an Argon2id PHC string with a fresh salt.
///
/// # Errors
///
/// Returns `GuardError::Hash` if hashing fails.
pub fn hash_passphrase(passphrase: &str) -> Result<String, GuardError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| GuardError::Hash(e.to_string()))
}

/// Check a passphrase against a stored PHC string.
///
/// # Errors
///
/// Returns `GuardError::Hash` if the stored string is not a valid PHC hash.
pub fn verify_passphrase(passphrase: &str, phc: &str) -> Result<bool, GuardError> {
    let parsed = PasswordHash::new(phc).map_err(|e| GuardError::Hash(format!("stored hash: {e}")))?;
    match Argon2::default().verify_password(passphrase.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(GuardError::Hash(e.to_string())),
    }
}

pub struct PassphraseAuthenticator<P = TerminalPrompt> {
    store: Arc<CredentialStore>,
    prompt: Arc<P>,
}

impl<P: PassphrasePrompt> PassphraseAuthenticator<P> {
    pub fn new(store: CredentialStore, prompt: P) -> Self {
        Self {
            store: Arc::new(store),
            prompt: Arc::new(prompt),
        }
    }

    /// Hash and store a new passphrase, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Other` for a blank passphrase, or a hashing or
    /// storage error.
    pub fn enroll(&self, passphrase: &str) -> Result<CredentialSource, GuardError> {
        if passphrase.trim().is_empty() {
            return Err(GuardError::Other("passphrase must not be blank".into()));
        }
        let hash = hash_passphrase(passphrase)?;
        let source = self.store.store(&hash)?;
        tracing::info!(%source, "passphrase enrolled");
        Ok(source)
    }

    /// Remove the stored passphrase.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::CredentialStore` if removal fails.
    pub fn forget(&self) -> Result<(), GuardError> {
        self.store.delete()?;
        tracing::info!("passphrase forgotten");
        Ok(())
    }

    async fn stored_hash(&self) -> Result<Option<String>, GuardError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| GuardError::Other(format!("credential lookup task: {e}")))
    }
}

impl<P: PassphrasePrompt> Authenticator for PassphraseAuthenticator<P> {
    async fn has_hardware(&self) -> Result<bool, GuardError> {
        Ok(self.store.is_reachable())
    }

    async fn is_enrolled(&self) -> Result<bool, GuardError> {
        Ok(self.stored_hash().await?.is_some())
    }

    async fn challenge(&self, prompt: &str, cancel_label: &str) -> Result<ChallengeOutcome, GuardError> {
        let Some(stored) = self.stored_hash().await? else {
            return Err(GuardError::NotEnrolled);
        };

        let reader = Arc::clone(&self.prompt);
        let message = prompt.to_string();
        let cancel = cancel_label.to_string();
        let input = tokio::task::spawn_blocking(move || reader.read_passphrase(&message, &cancel))
            .await
            .map_err(|e| GuardError::Prompt(format!("prompt task: {e}")))??;

        let Some(passphrase) = input else {
            return Ok(ChallengeOutcome::failure("cancelled"));
        };
        let matched = tokio::task::spawn_blocking(move || verify_passphrase(&passphrase, &stored))
            .await
            .map_err(|e| GuardError::Other(format!("verify task: {e}")))??;
        if matched {
            Ok(ChallengeOutcome::success())
        } else {
            Ok(ChallengeOutcome::failure("passphrase did not match"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued answers; `None` entries simulate cancel.
    struct ScriptedPrompt(Mutex<VecDeque<Option<String>>>);

    impl ScriptedPrompt {
        fn new(answers: &[Option<&str>]) -> Self {
            Self(Mutex::new(
                answers.iter().map(|a| a.map(str::to_string)).collect(),
            ))
        }
    }

    impl PassphrasePrompt for ScriptedPrompt {
        fn read_passphrase(&self, _: &str, _: &str) -> Result<Option<String>, GuardError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GuardError::Prompt("script exhausted".into()))
        }
    }

    fn authenticator(
        answers: &[Option<&str>],
    ) -> (tempfile::TempDir, PassphraseAuthenticator<ScriptedPrompt>) {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = CredentialStore::file_only(tmp.path().join("credential"));
        (tmp, PassphraseAuthenticator::new(store, ScriptedPrompt::new(answers)))
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_passphrase("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_passphrase("correct horse", &hash).unwrap());
        assert!(!verify_passphrase("wrong horse", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_error() {
        assert!(verify_passphrase("x", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn not_enrolled_until_enroll() {
        let (_tmp, auth) = authenticator(&[]);
        assert!(auth.has_hardware().await.unwrap());
        assert!(!auth.is_enrolled().await.unwrap());

        assert_eq!(auth.enroll("s3cret").unwrap(), CredentialSource::File);
        assert!(auth.is_enrolled().await.unwrap());

        auth.forget().unwrap();
        assert!(!auth.is_enrolled().await.unwrap());
    }

    #[tokio::test]
    async fn blank_enroll_rejected() {
        let (_tmp, auth) = authenticator(&[]);
        assert!(auth.enroll("   ").is_err());
    }

    #[tokio::test]
    async fn challenge_outcomes() {
        let (_tmp, auth) = authenticator(&[Some("wrong"), None, Some("s3cret")]);
        auth.enroll("s3cret").unwrap();

        let wrong = auth.challenge("Unlock", "Cancel").await.unwrap();
        assert_eq!(wrong, ChallengeOutcome::failure("passphrase did not match"));

        let cancelled = auth.challenge("Unlock", "Cancel").await.unwrap();
        assert_eq!(cancelled, ChallengeOutcome::failure("cancelled"));

        let ok = auth.challenge("Unlock", "Cancel").await.unwrap();
        assert_eq!(ok, ChallengeOutcome::success());
    }

    #[tokio::test]
    async fn challenge_without_enrollment_errors() {
        let (_tmp, auth) = authenticator(&[Some("anything")]);
        assert!(matches!(
            auth.challenge("Unlock", "Cancel").await,
            Err(GuardError::NotEnrolled)
        ));
    }
}
