use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(search: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut staff = allot_engine::records::list_staff(&ctx.db, search).await?;
    apply_limit(&mut staff, flags.limit);
    output(&staff, flags.format)
}
