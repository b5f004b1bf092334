use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Staff { action } => commands::staff::handle(&action, ctx, flags).await,
        Commands::Allocate { action } => commands::allocate::handle(&action, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags).await,
        Commands::Init => unreachable!("init is pre-dispatched in main"),
    }
}
