pub mod commands;
mod image_reader;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Command;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::Generator;
use clap_complete::Shell;
use clap_complete::generate;
use colored::Colorize;
use commands::Commands;
use omni_configuration::DEFAULT_CONFIGURATION_PATH;
use omni_configuration::SystemConfigurations;
use omni_orchestrator::Orchestrator;
use omni_orchestrator::logging::LogLevel;
use omni_orchestrator::logging::setup_logging;
use tracing::debug;

#[derive(Parser)]
#[command(name = "omni", author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long = "generate", value_enum)]
    generator: Option<Shell>,
    /// Configuration file, built-in defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIGURATION_PATH)]
    config: PathBuf,
    /// Overrides the OMNI_LOG filter
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Main function of the omni command line tool. Every invocation rehydrates
/// the repositories, handles one event and persists the result.
fn main() {
    if let Err(error) = run(Cli::parse()) {
        let error = format!("{:?}", error);
        eprintln!("{} {}", "error:".red().bold(), error);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        eprintln!("Generating completion file for {generator:?}...");
        print_completions(generator, &mut cmd);
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    dotenvy::dotenv().ok();
    let system_configurations = SystemConfigurations::read_all_configs(&cli.config)?;
    let _guard = setup_logging(&system_configurations.load().logging, cli.log_level)?;

    let stdin = io::stdin();
    let system_message =
        commands::handle_command(&command, &mut stdin.lock(), &mut io::stdout())?;
    debug!(?system_message, "handling command");

    let mut orchestrator = Orchestrator::new(system_configurations);
    let system_responses = orchestrator
        .handle(system_message)
        .context("omni did not complete the request")?;

    print!("{}", render::render(&system_responses));
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
