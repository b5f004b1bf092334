mod add;
mod capacity;
mod delete;
mod import;
mod interests;
mod list;
mod quotas;
mod update;

use allot_core::enums::Collection;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StaffCommands;
use crate::commands::shared::records::delete_all;
use crate::context::AppContext;

/// Handle `allot staff`.
pub async fn handle(
    action: &StaffCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StaffCommands::Import { file } => import::run(file, ctx, flags).await,
        StaffCommands::Add {
            name,
            email,
            quota,
            avoid,
        } => {
            add::run(
                add::Params {
                    name: name.clone(),
                    email: email.clone(),
                    quota: *quota,
                    avoid: avoid.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        StaffCommands::Update {
            staff,
            name,
            email,
            quota,
            avoid,
        } => {
            update::run(
                update::Params {
                    staff: staff.clone(),
                    name: name.clone(),
                    email: email.clone(),
                    quota: *quota,
                    avoid: avoid.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        StaffCommands::Delete { staff } => delete::run(staff, ctx, flags).await,
        StaffCommands::List { search } => list::run(search.as_deref(), ctx, flags).await,
        StaffCommands::DeleteAll { yes } => delete_all(Collection::Staff, *yes, ctx, flags).await,
        StaffCommands::QuotaImport { file } => quotas::run(file, ctx, flags).await,
        StaffCommands::InterestsImport { file } => interests::run(file, ctx, flags).await,
        StaffCommands::Capacity => capacity::run(ctx, flags).await,
    }
}
