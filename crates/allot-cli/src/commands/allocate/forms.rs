use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::source::open_csv;
use crate::context::AppContext;

/// `allot allocate self-report FILE`.
pub async fn self_report(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = allot_engine::allocate_self_report(&ctx.db, &ctx.config.engine, open_csv(file)?)
        .await
        .with_context(|| format!("self-report allocation from '{file}' failed"))?;
    super::print_report(&report, flags)
}

/// `allot allocate student-choice FILE`.
pub async fn student_choice(
    file: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report =
        allot_engine::allocate_student_choice(&ctx.db, &ctx.config.engine, open_csv(file)?)
            .await
            .with_context(|| format!("student-choice allocation from '{file}' failed"))?;
    super::print_report(&report, flags)
}
