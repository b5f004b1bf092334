mod add;
mod delete;
mod import;
mod list;
mod update;

use allot_core::enums::Collection;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::commands::shared::records::delete_all;
use crate::context::AppContext;

/// Handle `allot student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        StudentCommands::Import { file } => import::run(file, ctx, flags).await,
        StudentCommands::Add {
            student_id,
            first_name,
            surname,
            course,
            email,
        } => {
            add::run(
                add::Params {
                    student_id: student_id.clone(),
                    first_name: first_name.clone(),
                    surname: surname.clone(),
                    course: course.clone(),
                    email: email.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        StudentCommands::Update {
            student,
            student_id,
            first_name,
            surname,
            course,
            email,
        } => {
            update::run(
                update::Params {
                    student: student.clone(),
                    student_id: student_id.clone(),
                    first_name: first_name.clone(),
                    surname: surname.clone(),
                    course: course.clone(),
                    email: email.clone(),
                },
                ctx,
                flags,
            )
            .await
        }
        StudentCommands::Delete { student } => delete::run(student, ctx, flags).await,
        StudentCommands::List { search } => list::run(search.as_deref(), ctx, flags).await,
        StudentCommands::DeleteAll { yes } => {
            delete_all(Collection::Students, *yes, ctx, flags).await
        }
    }
}
