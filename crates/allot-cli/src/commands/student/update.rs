use allot_engine::records::StudentEdit;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub student: String,
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub course: Option<String>,
    pub email: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let edit = StudentEdit {
        student_id: params.student_id,
        first_name: params.first_name,
        surname: params.surname,
        course_code: params.course,
        email: params.email,
    };
    let student =
        allot_engine::records::edit_student(&ctx.db, &ctx.config.engine, &params.student, edit)
            .await
            .with_context(|| format!("failed to update student '{}'", params.student))?;
    output(&student, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.student_id.is_none()
        && params.first_name.is_none()
        && params.surname.is_none()
        && params.course.is_none()
        && params.email.is_none()
    {
        anyhow::bail!(
            "At least one of --student-id, --first-name, --surname, --course, or --email must be provided"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Params, validate_update_params};

    fn params() -> Params {
        Params {
            student: String::from("UP1"),
            student_id: None,
            first_name: None,
            surname: None,
            course: None,
            email: None,
        }
    }

    #[test]
    fn rejects_noop_update() {
        assert!(validate_update_params(&params()).is_err());
    }

    #[test]
    fn empty_course_counts_as_a_change() {
        let params = Params {
            course: Some(String::new()),
            ..params()
        };
        assert!(validate_update_params(&params).is_ok());
    }
}
