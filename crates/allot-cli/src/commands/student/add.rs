use allot_core::entities::Student;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub student_id: String,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub course: Option<String>,
    pub email: Option<String>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let student = Student {
        student_id: params.student_id,
        first_name: params.first_name.unwrap_or_default(),
        surname: params.surname.unwrap_or_default(),
        course_code: params.course,
        email: params.email,
        ..Student::default()
    };
    let created = allot_engine::records::add_student(&ctx.db, &ctx.config.engine, student)
        .await
        .context("failed to add student")?;
    output(&created, flags.format)
}
