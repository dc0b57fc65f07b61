use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "telbill")]
#[command(version)]
#[command(about = "Calculate the amount to pay for a telephone call log")]
#[command(long_about = "
telbill reads a call log (one call per line: number,start,end) and prints
the amount to pay. Calls to the most called number are free.

Example usage:
  telbill calls.csv                    # Print the total
  telbill --breakdown calls.csv        # Print per-number subtotals too
  cat calls.csv | telbill --format json
")]
pub struct Cli {
    /// Call log to bill, `-` or absent reads from stdin
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Configuration file (defaults to config/default and TELBILL__* variables)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show per-number subtotals and the waived number
    #[arg(short, long)]
    pub breakdown: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Log file path, `None` when the log comes from stdin
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_file
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_read_stdin() {
        let cli = Cli::try_parse_from(["telbill"]).unwrap();
        assert!(cli.log_path().is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.breakdown);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_dash_reads_stdin() {
        let cli = Cli::try_parse_from(["telbill", "-"]).unwrap();
        assert!(cli.log_path().is_none());
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "telbill",
            "--config",
            "billing.toml",
            "--format",
            "json",
            "--breakdown",
            "calls.csv",
        ])
        .unwrap();

        assert_eq!(cli.log_path(), Some(&PathBuf::from("calls.csv")));
        assert_eq!(cli.config.as_deref(), Some("billing.toml"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.breakdown);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["telbill", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
