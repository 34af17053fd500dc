use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_DATA_PATH: &str = "analysis.csv";

fn parse_tick_ms(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .map_err(|_| "Invalid tick interval".to_string())
        .and_then(|v| {
            if (10..=5000).contains(&v) {
                Ok(v)
            } else {
                Err("Tick interval must be between 10 and 5000 milliseconds".to_string())
            }
        })
}

#[derive(Parser, Debug)]
#[command(name = "bike-dashboard")]
#[command(about = "Render the bike sharing dashboard from a pre-computed dataset")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the report to stdout (default)
    #[command(visible_alias = "report")]
    Show(Args),

    /// Launch interactive dashboard
    #[command(visible_aliases = &["dash", "d"])]
    Dashboard {
        /// Path to the dataset CSV
        #[arg(long, default_value = DEFAULT_DATA_PATH)]
        data: String,

        /// Skip the sidebar image probe
        #[arg(long)]
        offline: bool,

        /// Input poll interval in milliseconds
        #[arg(long, default_value = "250", value_parser = parse_tick_ms)]
        tick_ms: u64,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Path to the dataset CSV
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Skip the sidebar image probe
    #[arg(long)]
    pub offline: bool,

    /// Hide the loading spinner
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA_PATH.to_string(),
            format: OutputFormat::Table,
            offline: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_show() {
        let cli = Cli::try_parse_from(["bike-dashboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_show_arguments() {
        let cli = Cli::try_parse_from([
            "bike-dashboard",
            "show",
            "--data",
            "data/hour.csv",
            "--format",
            "json",
            "--offline",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.data, "data/hour.csv");
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.offline);
                assert!(!args.quiet);
            }
            other => panic!("Expected Show, got {:?}", other),
        }
    }

    #[test]
    fn test_dashboard_defaults() {
        let cli = Cli::try_parse_from(["bike-dashboard", "dash"]).unwrap();
        match cli.command {
            Some(Commands::Dashboard {
                data,
                offline,
                tick_ms,
            }) => {
                assert_eq!(data, DEFAULT_DATA_PATH);
                assert!(!offline);
                assert_eq!(tick_ms, 250);
            }
            other => panic!("Expected Dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_tick_interval_bounds() {
        assert!(parse_tick_ms("5").is_err());
        assert!(parse_tick_ms("abc").is_err());
        assert_eq!(parse_tick_ms("100"), Ok(100));
    }
}
