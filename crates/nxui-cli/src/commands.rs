use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use nxui_constants::REGISTRY_URL;

#[derive(Parser)]
#[command(name = "nxui")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Checks NextUI packages and their peer dependencies for upgrades", long_about = None)]
#[command(disable_help_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project directory containing package.json
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,
    /// npm registry to query
    #[arg(long, global = true, default_value = REGISTRY_URL)]
    pub registry: String,
    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    /// Enable debug mode for verbose output
    #[arg(long, global = true)]
    pub debug: bool,
    /// Only print results and errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Checks installed NextUI packages and their peers for upgrades
    #[command(alias = "up")]
    Upgrade {
        /// Components to check (e.g. button or @nextui-org/button)
        #[arg()]
        packages: Vec<String>,
        /// Check the @nextui-org/react package as a whole
        #[arg(short = 'a', long)]
        all: bool,
        /// Print the upgrades as JSON
        #[arg(long)]
        json: bool,
    },
    /// Lists installed NextUI components
    #[command(alias = "ls")]
    List,
    /// Shows help information for nxui or a specific command
    Help {
        /// The command to show help for (optional)
        #[arg()]
        command: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_args() {
        let cli = Cli::try_parse_from(["nxui", "up", "button", "--json", "--cwd", "app"]).unwrap();

        match cli.command {
            Commands::Upgrade { packages, all, json } => {
                assert_eq!(packages, vec!["button"]);
                assert!(!all);
                assert!(json);
            }
            _ => panic!("expected upgrade"),
        }
        assert_eq!(cli.global.cwd, PathBuf::from("app"));
        assert_eq!(cli.global.registry, REGISTRY_URL);
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["nxui", "--no-color", "--debug", "list"]).unwrap();

        assert!(matches!(cli.command, Commands::List));
        assert!(cli.global.no_color);
        assert!(cli.global.debug);
        assert!(!cli.global.quiet);
    }
}
