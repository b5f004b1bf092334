use clap::Subcommand;

/// Allocation strategies.
#[derive(Clone, Debug, Subcommand)]
pub enum AllocateCommands {
    /// Assign or clear one role for one student, ignoring quotas.
    Manual {
        /// Student ID or document ID.
        #[arg(long)]
        student: String,
        /// supervisor or moderator.
        #[arg(long)]
        role: String,
        /// Staff full name or document ID.
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        staff: Option<String>,
        /// Remove the current holder.
        #[arg(long)]
        clear: bool,
    },
    /// List staff selectable for a manual assignment.
    Candidates {
        #[arg(long)]
        student: String,
        #[arg(long)]
        role: String,
    },
    /// Apply a self-report form export.
    SelfReport { file: String },
    /// Apply a student-choice form export.
    StudentChoice { file: String },
    /// Fill every missing supervisor and moderator.
    Default,
}
