use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cost_simulator::init_tracing;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    // The interactive form owns the terminal, log lines would tear the screen
    if !matches!(command, cli::Commands::Interactive) {
        init_tracing(&args.log_format);
    }

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Estimate(estimate_args) => {
            commands::estimate::execute(&args.config, &estimate_args)?;
        }
        cli::Commands::Interactive => {
            commands::interactive::execute(&args.config)?;
        }
        cli::Commands::Tiers => {
            commands::tiers::execute(&args.config)?;
        }
        cli::Commands::Currencies => {
            commands::currencies::execute();
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("Project Cost Simulator v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
