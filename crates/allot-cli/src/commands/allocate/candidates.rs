use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_role;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    student: &str,
    role: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role = parse_role(role)?;
    let staff = allot_engine::manual_candidates(&ctx.db, &ctx.config.engine, student, role)
        .await
        .context("failed to list candidates")?
        .with_context(|| format!("unknown student '{student}'"))?;
    output(&staff, flags.format)
}
