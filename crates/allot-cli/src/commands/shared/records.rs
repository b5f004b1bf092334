use allot_core::enums::Collection;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Remove every document in `collection` once the operator has confirmed.
pub async fn delete_all(
    collection: Collection,
    confirmed: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to delete all {collection} without --yes");
    }

    let summary = allot_engine::records::delete_all(&ctx.db, &ctx.config.engine, collection)
        .await
        .with_context(|| format!("failed to delete {collection}"))?;
    if summary.failed_batches > 0 {
        tracing::warn!(
            %collection,
            failed_batches = summary.failed_batches,
            "some delete batches did not commit"
        );
    }
    output(&summary, flags.format)
}
