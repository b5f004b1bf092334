#![allow(clippy::unused_async)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("allot error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if matches!(cli.command, cli::Commands::Init) {
        return commands::init::handle(&flags).await;
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire_for_project(&project_root).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(&project_root, config)
        .await
        .context("failed to initialize allot application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ALLOT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = context::strip_allot_dir(PathBuf::from(path))?;

        if explicit.join(".allot").is_dir() {
            return Ok(explicit);
        }

        if explicit.is_dir() {
            anyhow::bail!(
                "'{}' is not an allot project (no .allot directory). Run 'allot init' there first.",
                explicit.display()
            );
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not an allot project (no .allot directory found). Run 'allot init' first.")
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{AllocateCommands, StaffCommands, StudentCommands};

    match command {
        cli::Commands::Student { action } => !matches!(action, StudentCommands::List { .. }),
        cli::Commands::Staff { action } => !matches!(
            action,
            StaffCommands::List { .. } | StaffCommands::Capacity
        ),
        cli::Commands::Allocate { action } => {
            !matches!(action, AllocateCommands::Candidates { .. })
        }
        cli::Commands::Export(_) | cli::Commands::Init => false,
    }
}
