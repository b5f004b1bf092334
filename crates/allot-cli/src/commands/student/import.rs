use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::source::open_csv;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = allot_tabular::read_students(open_csv(file)?)
        .with_context(|| format!("failed to read students from '{file}'"))?;
    let summary = allot_engine::records::import_students(&ctx.db, &ctx.config.engine, &rows)
        .await
        .context("student import failed")?;
    output(&summary, flags.format)
}
