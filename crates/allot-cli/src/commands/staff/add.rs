use allot_core::entities::StaffMember;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub name: String,
    pub email: String,
    pub quota: Option<u32>,
    pub avoid: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let staff = StaffMember {
        full_name: params.name,
        email: params.email,
        quota: params.quota.unwrap_or(0),
        avoid: params
            .avoid
            .as_deref()
            .map(allot_tabular::split_list)
            .unwrap_or_default(),
        ..StaffMember::default()
    };
    let created = allot_engine::records::add_staff(&ctx.db, &ctx.config.engine, staff)
        .await
        .context("failed to add staff member")?;
    output(&created, flags.format)
}
