use cfcr_config::CfcrConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &CfcrConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Sessions(args) => commands::sessions::handle(&args, config, flags).await,
        Commands::Locations => commands::locations::handle(config, flags).await,
        Commands::Booked => commands::booked::handle(config, flags).await,
        Commands::Book(args) => commands::book::handle(&args, config, flags).await,
    }
}
