use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "house-pricer", version, about = "House price estimation service")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Start,

    /// Estimate a single house price from the command line
    Estimate(EstimateArgs),

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Total area in square meters
    #[arg(long)]
    pub area_m2: f64,

    #[arg(long)]
    pub bedrooms: u32,

    #[arg(long)]
    pub bathrooms: u32,

    /// Location quality, 0 (weak) to 10 (premium)
    #[arg(long)]
    pub location_score: f64,

    #[arg(long)]
    pub year_built: i32,

    #[arg(long)]
    pub garage: bool,

    #[arg(long)]
    pub garden: bool,

    /// Energy rating: A, B, C, D, E, F, or G
    #[arg(long)]
    pub energy_rating: String,

    /// Reference year for the age computation (defaults to the configured value)
    #[arg(long)]
    pub current_year: Option<i32>,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_start() {
        let cli = Cli {
            config: PathBuf::from("config.toml"),
            command: None,
        };

        matches!(cli.get_command(), Commands::Start);
    }

    #[test]
    fn test_cli_parsing_start_with_config_path() {
        let args = vec!["house-pricer", "start", "--config", "/etc/pricer.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/pricer.toml"));
        matches!(cli.get_command(), Commands::Start);
    }

    #[test]
    fn test_cli_parsing_estimate() {
        let args = vec![
            "house-pricer",
            "estimate",
            "--area-m2",
            "75",
            "--bedrooms",
            "2",
            "--bathrooms",
            "1",
            "--location-score",
            "7",
            "--year-built",
            "1998",
            "--garage",
            "--energy-rating",
            "C",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Estimate(estimate) => {
                assert_eq!(estimate.area_m2, 75.0);
                assert_eq!(estimate.bedrooms, 2);
                assert!(estimate.garage);
                assert!(!estimate.garden);
                assert_eq!(estimate.energy_rating, "C");
                assert!(estimate.current_year.is_none());
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let args = vec!["house-pricer", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Config { action } => {
                matches!(action, ConfigCommands::Show);
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_estimate_requires_energy_rating() {
        let args = vec![
            "house-pricer",
            "estimate",
            "--area-m2",
            "75",
            "--bedrooms",
            "2",
            "--bathrooms",
            "1",
            "--location-score",
            "7",
            "--year-built",
            "1998",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
