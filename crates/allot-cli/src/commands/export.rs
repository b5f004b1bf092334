use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::commands::shared::parse::parse_role;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    path: String,
    students: usize,
}

/// Handle `allot export`. Without `--output` the CSV itself goes to stdout.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let role = args.role.as_deref().map(parse_role).transpose()?;

    let mut csv = Vec::new();
    let students = allot_engine::export::write_export(&ctx.db, &ctx.config.engine, role, &mut csv)
        .await
        .context("export failed")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &csv).with_context(|| format!("failed to write '{path}'"))?;
            output(
                &ExportResponse {
                    path: path.clone(),
                    students,
                },
                flags.format,
            )
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&csv)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
