//! Session guard and credential configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vb_core::enums::UnavailablePolicy;

use crate::error::ConfigError;

const fn default_enabled() -> bool {
    true
}

fn default_prompt_message() -> String {
    "Authenticate to access Vaultbook".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

fn default_keyring_service() -> String {
    "vaultbook".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Security intent used until the operator toggles it explicitly.
    #[serde(default = "default_enabled")]
    pub enabled_by_default: bool,

    /// Behaviour when no challenge can be run.
    #[serde(default)]
    pub unavailable_policy: UnavailablePolicy,

    /// Text shown by the challenge prompt.
    #[serde(default = "default_prompt_message")]
    pub prompt_message: String,

    /// Label of the cancel action.
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,

    /// OS keyring service name for the passphrase hash.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Fallback credential file. Empty means `<config_dir>/vaultbook/credential`.
    #[serde(default)]
    pub credential_file: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled_by_default: default_enabled(),
            unavailable_policy: UnavailablePolicy::default(),
            prompt_message: default_prompt_message(),
            cancel_label: default_cancel_label(),
            keyring_service: default_keyring_service(),
            credential_file: String::new(),
        }
    }
}

impl SecurityConfig {
    /// Resolve the fallback credential file path.
    #[must_use]
    pub fn resolved_credential_file(&self) -> Option<PathBuf> {
        if !self.credential_file.trim().is_empty() {
            return Some(PathBuf::from(&self.credential_file));
        }
        dirs::config_dir().map(|dir| dir.join("vaultbook").join("credential"))
    }

    /// Reject empty prompt text or keyring service.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("security.prompt_message", &self.prompt_message),
            ("security.cancel_label", &self.cancel_label),
            ("security.keyring_service", &self.keyring_service),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SecurityConfig::default();
        assert!(config.enabled_by_default);
        assert_eq!(config.unavailable_policy, UnavailablePolicy::Deny);
        assert_eq!(config.prompt_message, "Authenticate to access Vaultbook");
        assert_eq!(config.cancel_label, "Cancel");
        assert_eq!(config.keyring_service, "vaultbook");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_keyring_service_invalid() {
        let config = SecurityConfig {
            keyring_service: "  ".into(),
            ..SecurityConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("security.keyring_service"));
    }

    #[test]
    fn explicit_credential_file_wins() {
        let config = SecurityConfig {
            credential_file: "/tmp/cred".into(),
            ..SecurityConfig::default()
        };
        assert_eq!(
            config.resolved_credential_file(),
            Some(PathBuf::from("/tmp/cred"))
        );
    }
}
