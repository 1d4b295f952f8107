use clap::{Args, Parser, Subcommand, ValueEnum};
use cost_simulator::models::Currency;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cost-sim", version, about = "Project Cost Simulator")]
pub struct Cli {
    /// Scenario file path
    #[arg(short, long, default_value = "scenario.toml", global = true)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"], global = true)]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute and print the cost breakdown (default)
    Estimate(EstimateArgs),

    /// Edit the scenario in an interactive terminal form
    Interactive,

    /// List commitment tiers and their discounts
    Tiers,

    /// List supported currencies
    Currencies,

    /// Scenario file management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

/// Overrides applied on top of the scenario file
#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    /// Number of sprints (1-50)
    #[arg(long)]
    pub sprints: Option<u32>,

    /// Sprint duration in weeks (1-4)
    #[arg(long)]
    pub sprint_weeks: Option<u32>,

    /// Display currency (USD, EUR, AED, SAR, EGP, GBP)
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Commitment term in years (1, 2, 3 or 5)
    #[arg(long)]
    pub commitment: Option<u32>,

    /// Markup percentage
    #[arg(long)]
    pub markup: Option<f64>,

    /// Additional discount percentage
    #[arg(long)]
    pub discount: Option<f64>,

    /// Charge licensing as a percentage of one-off costs
    #[arg(long)]
    pub license_percent: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective scenario (file, environment and defaults merged)
    Show,

    /// Validate the scenario file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Estimate if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Estimate(EstimateArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_estimate() {
        let cli = Cli {
            config: PathBuf::from("scenario.toml"),
            log_format: "text".to_string(),
            command: None,
        };

        match cli.get_command() {
            Commands::Estimate(args) => {
                assert!(args.sprints.is_none());
                assert_eq!(args.format, OutputFormat::Table);
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_parsing_estimate_overrides() {
        let args = vec![
            "cost-sim",
            "estimate",
            "--sprints",
            "12",
            "--currency",
            "eur",
            "--commitment",
            "3",
            "--format",
            "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Estimate(args) => {
                assert_eq!(args.sprints, Some(12));
                assert_eq!(args.currency, Some(Currency::Eur));
                assert_eq!(args.commitment, Some(3));
                assert_eq!(args.format, OutputFormat::Json);
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_currency() {
        let args = vec!["cost-sim", "estimate", "--currency", "JPY"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_config_show_with_path() {
        let args = vec!["cost-sim", "config", "show", "--config", "other.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Show
            }
        ));
    }
}
