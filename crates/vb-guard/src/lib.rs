//! # vb-guard
//!
//! Authentication gating for Vaultbook.
//!
//! The [`SecurityContext`] owns the session state machine
//! (`Initializing → Locked ↔ Unlocked`) and is the only place it changes.
//! The platform challenge sits behind the [`Authenticator`] trait; the
//! terminal build uses [`PassphraseAuthenticator`], which verifies an
//! Argon2id hash kept in the OS keyring (`keyring`) or a `0600` fallback file.
//! Host lifecycle transitions arrive through a [`LifecycleNotifier`] and
//! re-lock the session while it is in the background.

pub mod authenticator;
pub mod credential_store;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod passphrase;
pub mod state;

pub use authenticator::{Authenticator, ChallengeOutcome};
pub use credential_store::{CredentialSource, CredentialStore};
pub use error::GuardError;
pub use guard::{ChallengePrompt, SecurityContext};
pub use lifecycle::{LifecycleEvent, LifecycleNotifier, LifecycleSubscription};
pub use passphrase::{PassphraseAuthenticator, PassphrasePrompt, TerminalPrompt};
pub use state::{GuardState, LockReason, SessionSnapshot};
