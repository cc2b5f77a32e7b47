use std::io::BufRead;
use std::io::Write;

use anyhow::Result;
use clap::Subcommand;
use omni_contracts::SystemMessages;

pub mod admin;
pub mod contractor;

use admin::AdminCommands;
use contractor::ContractorCommands;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage service orders and post schedules
    Admin {
        #[clap(subcommand)]
        admin_commands: AdminCommands,
    },
    /// Work through assigned service orders
    Contractor {
        #[clap(subcommand)]
        contractor_commands: ContractorCommands,
    },
}

pub fn handle_command(
    command: &Commands,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<SystemMessages> {
    match command {
        Commands::Admin { admin_commands } => admin_commands.execute(input, output),
        Commands::Contractor {
            contractor_commands,
        } => contractor_commands.execute(),
    }
}

/// Asks a yes/no question; anything but `y` or `yes` is a no.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{} ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
