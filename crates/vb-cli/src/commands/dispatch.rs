use vb_core::entities::{
    Advance, Client, Expense, Liability, PasswordEntry, Project, Provision, Revenue,
};

use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::{AppContext, gate};

/// Route a parsed command to its handler, running the session gate first
/// for anything that reads or writes vault data. Configured sample data is
/// written only once the gate has passed.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if command_requires_gate(&command) {
        gate::require_unlocked(ctx).await?;
        ctx.seed_if_configured().await?;
    }

    match command {
        Commands::Password { action } => {
            commands::records::handle::<PasswordEntry>(&action, ctx, flags).await
        }
        Commands::Revenue { action } => {
            commands::records::handle::<Revenue>(&action, ctx, flags).await
        }
        Commands::Expense { action } => {
            commands::records::handle::<Expense>(&action, ctx, flags).await
        }
        Commands::Provision { action } => {
            commands::records::handle::<Provision>(&action, ctx, flags).await
        }
        Commands::Advance { action } => {
            commands::records::handle::<Advance>(&action, ctx, flags).await
        }
        Commands::Liability { action } => {
            commands::records::handle::<Liability>(&action, ctx, flags).await
        }
        Commands::Client { action } => {
            commands::records::handle::<Client>(&action, ctx, flags).await
        }
        Commands::Project { action } => {
            commands::records::handle::<Project>(&action, ctx, flags).await
        }
        Commands::Summary => commands::summary::handle_summary(ctx, flags).await,
        Commands::Dashboard => commands::summary::handle_dashboard(ctx, flags).await,
        Commands::Seed => commands::summary::handle_seed(ctx, flags).await,
        Commands::Security { action } => commands::security::handle(&action, ctx, flags).await,
    }
}

/// Security subcommands run their own checks.
const fn command_requires_gate(command: &Commands) -> bool {
    !matches!(command, Commands::Security { .. })
}
