use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = allot_engine::allocate_default(&ctx.db, &ctx.config.engine)
        .await
        .context("default allocation failed")?;
    if report.is_noop() {
        tracing::info!("every student already has a supervisor and a moderator");
    }
    super::print_report(&report, flags)
}
