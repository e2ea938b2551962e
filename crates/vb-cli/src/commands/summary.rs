use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `vbk summary`.
pub async fn handle_summary(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.financial_summary().await?, flags.format)
}

/// Handle `vbk dashboard`.
pub async fn handle_dashboard(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ctx.service.dashboard().await?, flags.format)
}

/// Handle `vbk seed`.
pub async fn handle_seed(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.seed_sample_data().await?;
    output(&report, flags.format)
}
