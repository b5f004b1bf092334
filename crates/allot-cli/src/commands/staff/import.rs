use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::source::open_csv;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = allot_tabular::read_staff(open_csv(file)?)
        .with_context(|| format!("failed to read staff from '{file}'"))?;
    let summary = allot_engine::records::import_staff(&ctx.db, &ctx.config.engine, &rows)
        .await
        .context("staff import failed")?;
    output(&summary, flags.format)
}
