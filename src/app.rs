//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main that:
//! - parses CLI arguments and loads configuration
//! - builds the HTTP-backed aggregator
//! - runs the chosen command and prints its report
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FetchArgs, ModelArgs};
use crate::config::{ApiConfig, AppConfig};
use crate::data::{Aggregator, HttpTransport, ListingApi};
use crate::domain::Category;
use crate::error::AppError;
use crate::io::{ListingSnapshot, write_listings_csv, write_snapshot_json};

pub mod pipeline;

use pipeline::FetchConfig;

/// Entry point for the `cheongyak` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let config = AppConfig::load()?;
    crate::telemetry::init(&config.telemetry)?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let aggregator = connect(&config.api)?;
    match cli.command {
        Command::Fetch(args) => handle_fetch(&aggregator, &args, &config.api),
        Command::Test => handle_test(&aggregator),
        Command::Models(args) => handle_models(&aggregator, &args),
    }
}

/// Build the aggregator over a real HTTP client.
pub fn connect(api: &ApiConfig) -> Result<Aggregator<HttpTransport>, AppError> {
    let transport = HttpTransport::new(api.timeout)
        .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
    Ok(Aggregator::new(ListingApi::new(
        transport,
        &api.base_url,
        &api.service_key,
    )))
}

fn handle_fetch(aggregator: &Aggregator<HttpTransport>, args: &FetchArgs, api: &ApiConfig) -> Result<(), AppError> {
    let config = fetch_config_from_args(args, api);
    let run = pipeline::run_fetch(aggregator, &config)?;

    println!("{}", crate::report::format_summary(&run.summary));

    if let Some(path) = &args.export_csv {
        let rows = write_listings_csv(path, &run.listings)?;
        info!(path = %path.display(), rows, "CSV export written");
    }
    if let Some(path) = &args.export_json {
        write_snapshot_json(path, &ListingSnapshot::now(run.listings))?;
        info!(path = %path.display(), "Snapshot written");
    }

    Ok(())
}

fn handle_test(aggregator: &Aggregator<HttpTransport>) -> Result<(), AppError> {
    let probe = aggregator.test_connection();
    print!("{}", crate::report::format_probe(&probe));
    if probe.ok {
        Ok(())
    } else {
        Err(AppError::new(3, format!("Connectivity probe failed: {}", probe.message)))
    }
}

fn handle_models(aggregator: &Aggregator<HttpTransport>, args: &ModelArgs) -> Result<(), AppError> {
    let category = Category::from_id(&args.category)?;
    let models = aggregator.fetch_model_types(category.id(), &args.house_no, args.pblanc_no.as_deref())?;
    print!(
        "{}",
        crate::report::format_model_types(category, args.house_no.trim(), &models)
    );
    Ok(())
}

pub fn fetch_config_from_args(args: &FetchArgs, api: &ApiConfig) -> FetchConfig {
    FetchConfig {
        start: args.start,
        end: args.end,
        max_rows: args.max_rows.unwrap_or(api.max_rows),
        recent: args.recent,
    }
}

/// Rewrite argv so `cheongyak` defaults to `cheongyak fetch`.
///
/// Rules:
/// - `cheongyak`                      -> `cheongyak fetch`
/// - `cheongyak --start 2024-01-01`   -> `cheongyak fetch --start 2024-01-01`
/// - `cheongyak --help/--version/-h`  -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fetch".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "fetch".to_string());
    }
    argv
}
