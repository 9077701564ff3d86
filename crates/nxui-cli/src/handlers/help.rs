use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use nxui_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, REPOSITORY_URL, VERSION};

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(cmd) => Self::show_command_help(cmd),
            None => {
                Self::show_custom_help();
                Ok(())
            }
        }
    }

    fn show_command_help(command: &str) -> Result<()> {
        let mut cmd = Cli::command();

        if let Some(subcommand) = cmd.find_subcommand_mut(command) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{}'",
                "Error".bright_red().bold(),
                command
            );
            println!();
            Self::show_custom_help();
        }

        println!();
        Ok(())
    }

    fn show_custom_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "<COMMAND>".bright_white(),
            "<OPTIONS>".bright_black().bold(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let max_cmd_width = COMMANDS
            .iter()
            .map(|(cmd, _, aliases)| cmd.len() + Self::alias_suffix(aliases).len())
            .max()
            .unwrap_or(0);

        for (cmd, desc, aliases) in COMMANDS {
            let alias_str = Self::alias_suffix(aliases);
            let plain_cmd = format!("{cmd}{alias_str}");
            let colored_cmd = format!(
                "{}{}",
                cmd.bright_cyan().bold(),
                alias_str.bright_black().bold()
            );
            println!(
                "  {:width$}  # {}",
                colored_cmd,
                desc.bright_black().bold(),
                width = max_cmd_width + (colored_cmd.len() - plain_cmd.len())
            );
        }
        println!();

        println!("{}", "Options:".bright_magenta().bold());
        let options = [
            ("--cwd <DIR>", "Project directory containing package.json"),
            ("--registry <URL>", "npm registry to query"),
            ("--no-color", "Disable colored output"),
            ("--debug", "Enable debug output"),
            ("-q, --quiet", "Only print results and errors"),
            ("-V, --version", "Print version"),
        ];
        let max_option_width = options.iter().map(|(opt, _)| opt.len()).max().unwrap_or(0);
        for (option, desc) in options {
            let colored_option = option.bright_cyan().bold().to_string();
            println!(
                "  {:width$}  # {}",
                colored_option,
                desc.bright_black().bold(),
                width = max_option_width + (colored_option.len() - option.len())
            );
        }
        println!();

        Self::show_examples();
    }

    fn alias_suffix(aliases: &[&str]) -> String {
        if aliases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", aliases.join(", "))
        }
    }

    fn format_example(cmd: &str) -> String {
        cmd.split_whitespace()
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    part.bright_cyan().bold().to_string()
                } else if part.starts_with('-') {
                    part.bright_black().bold().to_string()
                } else {
                    part.bright_white().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn show_examples() {
        println!("{}", "Examples:".bright_magenta().bold());

        let help_cmd = format!("{BIN_NAME} help <command>");
        let max_example_width = EXAMPLES
            .iter()
            .map(|(cmd, _)| cmd.len())
            .chain([help_cmd.len()])
            .max()
            .unwrap_or(0);

        for (cmd, desc) in EXAMPLES {
            let formatted_cmd = Self::format_example(cmd);
            println!(
                "  {:width$}  # {}",
                formatted_cmd,
                desc.bright_black().bold(),
                width = max_example_width + (formatted_cmd.len() - cmd.len())
            );
        }

        println!();
        println!(
            "{}",
            "For more information about a specific command, use:".bright_magenta()
        );

        let formatted_help_cmd = format!(
            "{} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "help".bright_white(),
            "<command>".bright_black().bold()
        );
        println!(
            "  {:width$}  # {}",
            formatted_help_cmd,
            "Show help for specific command".bright_black().bold(),
            width = max_example_width + (formatted_help_cmd.len() - help_cmd.len())
        );
        println!();
        println!(
            "Visit {} for more information",
            REPOSITORY_URL.bright_cyan().underline()
        );
    }
}
