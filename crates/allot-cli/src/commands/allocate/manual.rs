use allot_engine::ManualTarget;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_role;
use crate::context::AppContext;

pub async fn run(
    student: &str,
    role: &str,
    staff: Option<&str>,
    clear: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role = parse_role(role)?;
    let target = if clear {
        ManualTarget::Clear
    } else {
        ManualTarget::Staff(
            staff
                .context("either --staff or --clear is required")?
                .to_string(),
        )
    };

    let report = allot_engine::allocate_manual(&ctx.db, &ctx.config.engine, student, role, &target)
        .await
        .context("manual allocation failed")?;
    super::print_report(&report, flags)
}
