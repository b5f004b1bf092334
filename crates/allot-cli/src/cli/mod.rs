use clap::{Parser, ValueEnum};

pub mod root_commands;
pub mod subcommands;

pub use root_commands::Commands;

/// How command responses are printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned text table.
    Table,
    /// Single-line JSON.
    Raw,
}

/// The global options handlers read. `--verbose` only affects logging and
/// stays on [`Cli`].
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub project: Option<String>,
}

/// Top-level CLI parser for the `allot` binary.
#[derive(Debug, Parser)]
#[command(
    name = "allot",
    version,
    about = "Allot - supervisor and moderator allocation for student cohorts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to return from list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .allot)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}
