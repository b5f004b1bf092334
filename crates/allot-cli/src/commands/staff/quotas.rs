use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::source::open_csv;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = allot_tabular::read_quotas(open_csv(file)?)
        .with_context(|| format!("failed to read quotas from '{file}'"))?;
    let summary = allot_engine::records::import_quotas(&ctx.db, &ctx.config.engine, &rows)
        .await
        .context("quota import failed")?;
    if summary.rejected > 0 {
        tracing::warn!(rejected = summary.rejected, "some quota rows were rejected");
    }
    output(&summary, flags.format)
}
