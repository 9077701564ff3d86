pub mod commands;
pub mod handlers;

use clap::Parser;

use commands::{Cli, Commands};
use handlers::{HelpHandler, ListHandler, UpgradeHandler};

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    nxui_logger::init_logger(cli.global.quiet, cli.global.debug);

    match &cli.command {
        Commands::Upgrade {
            packages,
            all,
            json,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(UpgradeHandler::handle_upgrade(
                &cli.global,
                packages,
                *all,
                *json,
            ))
        }
        Commands::List => ListHandler::handle_list_components(&cli.global),
        Commands::Help { command } => HelpHandler::handle_help(command.as_deref()),
    }
}
