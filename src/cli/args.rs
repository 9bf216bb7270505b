use crate::models::City;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-archiver")]
#[command(about = "Archive and summarise three years of daily city weather")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: climate-archiver.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct Selection {
    #[arg(short, long, help = "Target year; the two preceding years are processed too")]
    pub year: i32,

    #[arg(short, long, value_enum, ignore_case = true)]
    pub city: City,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest the three-year window, then print the summary for the target year
    Run {
        #[command(flatten)]
        selection: Selection,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,

        #[arg(long, help = "Download the station inventory even if a local copy exists")]
        refresh_stations: bool,
    },

    /// Fetch, merge, impute and archive the three-year window
    Ingest {
        #[command(flatten)]
        selection: Selection,

        #[arg(long, help = "Download the station inventory even if a local copy exists")]
        refresh_stations: bool,
    },

    /// Summarise the target year from previously archived data
    Summarize {
        #[command(flatten)]
        selection: Selection,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from(["climate-archiver", "run", "--year", "2018", "--city", "Toronto"]);
        match cli.command {
            Commands::Run {
                selection, json, ..
            } => {
                assert_eq!(selection.year, 2018);
                assert_eq!(selection.city, City::Toronto);
                assert!(!json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_rejects_unknown_city() {
        let result = Cli::try_parse_from([
            "climate-archiver",
            "summarize",
            "--year",
            "2018",
            "--city",
            "Vancouver",
        ]);
        assert!(result.is_err());
    }
}
