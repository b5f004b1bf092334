use allot_engine::records::StaffEdit;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub staff: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub quota: Option<u32>,
    pub avoid: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let edit = StaffEdit {
        full_name: params.name,
        email: params.email,
        quota: params.quota,
        avoid: params.avoid.as_deref().map(allot_tabular::split_list),
    };
    let staff = allot_engine::records::edit_staff(&ctx.db, &ctx.config.engine, &params.staff, edit)
        .await
        .with_context(|| format!("failed to update staff member '{}'", params.staff))?;
    output(&staff, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.name.is_none()
        && params.email.is_none()
        && params.quota.is_none()
        && params.avoid.is_none()
    {
        anyhow::bail!("At least one of --name, --email, --quota, or --avoid must be provided");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Params, validate_update_params};

    #[test]
    fn rejects_noop_update() {
        let params = Params {
            staff: String::from("A. Smith"),
            name: None,
            email: None,
            quota: None,
            avoid: None,
        };
        assert!(validate_update_params(&params).is_err());
    }

    #[test]
    fn accepts_quota_only() {
        let params = Params {
            staff: String::from("A. Smith"),
            name: None,
            email: None,
            quota: Some(0),
            avoid: None,
        };
        assert!(validate_update_params(&params).is_ok());
    }
}
