use clap::Subcommand;

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum SecurityCommands {
    /// Show security intent, enrollment, and policy
    Status,
    /// Turn security on (requires an enrolled passphrase)
    Enable,
    /// Turn security off
    Disable,
    /// Authenticate, then lock the session
    Lock,
    /// Set or replace the vault passphrase
    Enroll,
    /// Remove the stored passphrase
    Forget,
}
