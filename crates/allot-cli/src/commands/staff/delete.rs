use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(staff: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let removal = allot_engine::records::delete_staff(&ctx.db, &ctx.config.engine, staff)
        .await
        .with_context(|| format!("failed to delete staff member '{staff}'"))?;
    output(&removal, flags.format)
}
