use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::source::open_csv;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = allot_tabular::read_interests(open_csv(file)?)
        .with_context(|| format!("failed to read interests from '{file}'"))?;
    let summary = allot_engine::records::import_interests(&ctx.db, &ctx.config.engine, &rows)
        .await
        .context("interests import failed")?;
    output(&summary, flags.format)
}
