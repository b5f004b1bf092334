use clap::Subcommand;

/// Student record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Import students from a CSV file.
    Import { file: String },
    /// Add one student.
    Add {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Update one student, by document ID or student ID.
    Update {
        student: String,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        /// Course code; an empty value clears it.
        #[arg(long)]
        course: Option<String>,
        /// Email; an empty value clears it.
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete one student, by document ID or student ID.
    Delete { student: String },
    /// List students.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete every student record.
    DeleteAll {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}
