use clap::Subcommand;

/// Staff record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StaffCommands {
    /// Import staff from a CSV file.
    Import { file: String },
    /// Add one staff member.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        quota: Option<u32>,
        /// Comma-separated names this staff member should not be paired with.
        #[arg(long)]
        avoid: Option<String>,
    },
    /// Update one staff member, by document ID or full name.
    Update {
        staff: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        quota: Option<u32>,
        /// Comma-separated names; an empty value clears the list.
        #[arg(long)]
        avoid: Option<String>,
    },
    /// Delete one staff member, by document ID or full name.
    Delete { staff: String },
    /// List staff.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete every staff record.
    DeleteAll {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Import per-role quotas from a CSV file.
    QuotaImport { file: String },
    /// Import research interests and project ideas from a CSV file.
    InterestsImport { file: String },
    /// Show allocations and remaining quota per staff member.
    Capacity,
}
