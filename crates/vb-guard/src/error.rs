use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("no passphrase enrolled; run `vbk security enroll`")]
    NotEnrolled,

    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("passphrase hashing failed: {0}")]
    Hash(String),

    #[error("passphrase prompt failed: {0}")]
    Prompt(String),

    #[error("platform check failed: {0}")]
    Platform(String),

    #[error("{0}")]
    Other(String),
}
