use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(student: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = allot_engine::records::delete_student(&ctx.db, &ctx.config.engine, student)
        .await
        .with_context(|| format!("failed to delete student '{student}'"))?;
    output(&deleted, flags.format)
}
