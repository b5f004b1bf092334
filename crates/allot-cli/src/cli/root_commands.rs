use clap::{Args, Subcommand};

use crate::cli::subcommands::{AllocateCommands, StaffCommands, StudentCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize allot for a project directory.
    Init,
    /// Student records.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Staff records, quotas, and interests.
    Staff {
        #[command(subcommand)]
        action: StaffCommands,
    },
    /// Run an allocation strategy.
    Allocate {
        #[command(subcommand)]
        action: AllocateCommands,
    },
    /// Export allocations as CSV.
    Export(ExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Export only one role: supervisor or moderator.
    #[arg(long)]
    pub role: Option<String>,
    /// Write the CSV to this file instead of stdout.
    #[arg(long)]
    pub output: Option<String>,
}
