//! Command-line parsing for the 청약 listing fetcher.
//!
//! Argument parsing and command dispatch stay separate from the fetch code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cheongyak", version, about = "청약 분양정보 수집기 (ApplyhomeInfoDetailSvc)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every category, print a summary, and optionally export.
    Fetch(FetchArgs),
    /// Probe connectivity with a single minimal request.
    Test,
    /// Show the per-model-type rows of one listing.
    Models(ModelArgs),
}

#[derive(Debug, Parser, Clone, Default)]
pub struct FetchArgs {
    /// Earliest announcement date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Latest announcement date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Rows per category (defaults to CHEONGYAK_MAX_ROWS).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_rows: Option<u32>,

    /// Number of recent listings to show.
    #[arg(long, default_value_t = crate::report::DEFAULT_RECENT)]
    pub recent: usize,

    /// Export the combined listings to CSV.
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export a JSON snapshot of the run.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct ModelArgs {
    /// Category id (apt, officetel, remainder, public_rental, optional_supply).
    #[arg(short = 'c', long)]
    pub category: String,

    /// House management number of the listing.
    #[arg(long = "house-no")]
    pub house_no: String,

    /// Announcement number, when a listing has several.
    #[arg(long = "pblanc-no")]
    pub pblanc_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_parses_dates_and_exports() {
        let cli = Cli::try_parse_from([
            "cheongyak",
            "fetch",
            "--start",
            "2024-01-01",
            "--max-rows",
            "200",
            "--export-csv",
            "out.csv",
        ])
        .unwrap();
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(args.end, None);
        assert_eq!(args.max_rows, Some(200));
        assert_eq!(args.recent, 10);
        assert_eq!(args.export_csv, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn rejects_bad_dates_and_zero_rows() {
        assert!(Cli::try_parse_from(["cheongyak", "fetch", "--start", "2024/01/01"]).is_err());
        assert!(Cli::try_parse_from(["cheongyak", "fetch", "--max-rows", "0"]).is_err());
    }

    #[test]
    fn models_requires_category_and_house_no() {
        assert!(Cli::try_parse_from(["cheongyak", "models", "--category", "apt"]).is_err());
        let cli = Cli::try_parse_from(["cheongyak", "models", "-c", "apt", "--house-no", "2024000123"]).unwrap();
        let Command::Models(args) = cli.command else {
            panic!("expected models");
        };
        assert_eq!(args.house_no, "2024000123");
        assert_eq!(args.pblanc_no, None);
    }
}
