mod candidates;
mod fill;
mod forms;
mod manual;

use allot_core::responses::AllocationReport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AllocateCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `allot allocate`.
pub async fn handle(
    action: &AllocateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AllocateCommands::Manual {
            student,
            role,
            staff,
            clear,
        } => manual::run(student, role, staff.as_deref(), *clear, ctx, flags).await,
        AllocateCommands::Candidates { student, role } => {
            candidates::run(student, role, ctx, flags).await
        }
        AllocateCommands::SelfReport { file } => forms::self_report(file, ctx, flags).await,
        AllocateCommands::StudentChoice { file } => {
            forms::student_choice(file, ctx, flags).await
        }
        AllocateCommands::Default => fill::run(ctx, flags).await,
    }
}

/// Print a strategy report; per-row failures are part of the output, not an error.
fn print_report(report: &AllocationReport, flags: &GlobalFlags) -> anyhow::Result<()> {
    if report.failed > 0 && !flags.quiet {
        tracing::info!(
            strategy = %report.strategy,
            failed = report.failed,
            "allocation finished with failures"
        );
    }
    output(report, flags.format)
}
