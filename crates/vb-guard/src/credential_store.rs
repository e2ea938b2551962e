//! Storage for the passphrase hash.
//!
//! The OS keyring is preferred. When it cannot be used the hash goes to a
//! `0600` file (directory `0700`). Only the Argon2 PHC string is stored,
//! never the passphrase itself.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::GuardError;

const KEYRING_USER: &str = "passphrase-hash";

/// Where the stored hash currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    Keyring,
    File,
}

impl CredentialSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::File => "file",
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Keyring service name; `None` disables the keyring tier.
    service: Option<String>,
    file_path: Option<PathBuf>,
}

impl CredentialStore {
    /// Keyring under `service`, falling back to `file_path` when given.
    pub fn new(service: impl Into<String>, file_path: Option<PathBuf>) -> Self {
        Self {
            service: Some(service.into()),
            file_path,
        }
    }

    /// File-only store, never touching the keyring.
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            service: None,
            file_path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn entry(&self) -> Option<keyring::Entry> {
        let service = self.service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring entry unavailable");
                None
            }
        }
    }

    /// Whether at least one storage tier can be used.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.file_path.is_some() || self.entry().is_some()
    }

    /// Store a hash, preferring the keyring.
    ///
    /// The keyring write is read back before it is trusted, since some
    /// platforms accept writes into a store that does not persist.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::CredentialStore` if neither tier accepts the hash.
    pub fn store(&self, hash: &str) -> Result<CredentialSource, GuardError> {
        if let Some(entry) = self.entry() {
            match entry.set_password(hash) {
                Ok(()) if entry.get_password().is_ok_and(|stored| stored == hash) => {
                    // Drop any older file copy.
                    self.remove_file()?;
                    return Ok(CredentialSource::Keyring);
                }
                Ok(()) => {
                    tracing::warn!("keyring write did not persist; falling back to file");
                }
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                }
            }
        }
        self.store_file(hash)?;
        Ok(CredentialSource::File)
    }

    /// Load the stored hash. Priority: keyring, then file.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        if let Some(entry) = self.entry()
            && let Ok(hash) = entry.get_password()
            && !hash.trim().is_empty()
        {
            return Some(hash);
        }
        self.load_file()
    }

    /// Which tier holds the hash, if any.
    #[must_use]
    pub fn detect_source(&self) -> Option<CredentialSource> {
        if let Some(entry) = self.entry()
            && entry.get_password().is_ok_and(|h| !h.trim().is_empty())
        {
            return Some(CredentialSource::Keyring);
        }
        self.load_file().map(|_| CredentialSource::File)
    }

    /// Delete the hash from every tier.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::CredentialStore` if the file cannot be removed.
    pub fn delete(&self) -> Result<(), GuardError> {
        if let Some(entry) = self.entry() {
            // May not exist.
            let _ = entry.delete_credential();
        }
        self.remove_file()
    }

    // --- Private file helpers ---

    fn remove_file(&self) -> Result<(), GuardError> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                GuardError::CredentialStore(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn store_file(&self, hash: &str) -> Result<(), GuardError> {
        let path = self.file_path.as_ref().ok_or_else(|| {
            GuardError::CredentialStore("keyring unavailable and no credential file configured".into())
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GuardError::CredentialStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, hash)
            .map_err(|e| GuardError::CredentialStore(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                GuardError::CredentialStore(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.file_path.as_ref()?;
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
