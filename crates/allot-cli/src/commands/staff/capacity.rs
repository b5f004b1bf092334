use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = allot_engine::records::capacity_summary(&ctx.db, &ctx.config.engine).await?;
    output(&rows, flags.format)
}
