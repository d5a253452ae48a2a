//! CLI entry point for the crime statistics tool.
//!
//! Loads a crime-incident CSV, derives the hour and age-bracket fields, runs
//! the three aggregations, and writes charts, CSVs, and a text summary.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crime_stats::analyzers::aggregate::{age_distribution, hourly_counts, night_area_counts};
use crime_stats::analyzers::types::CrimeSummary;
use crime_stats::charts;
use crime_stats::features::derive_hours;
use crime_stats::loader::load_incidents;
use crime_stats::output;

#[derive(Parser)]
#[command(name = "crime_stats")]
#[command(about = "Descriptive statistics over a crime-incident CSV export", long_about = None)]
struct Cli {
    /// Path to the incident CSV file
    #[arg(short, long, default_value = "crimes.csv")]
    input: PathBuf,

    /// Directory to write charts, CSVs, and the summary into
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/crime_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("crime_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let incidents = load_incidents(&cli.input)?;
    info!(
        count = incidents.len(),
        input = %cli.input.display(),
        "Incident file loaded"
    );

    let hours = derive_hours(&incidents)?;

    let hourly = hourly_counts(&hours);
    let night = night_area_counts(&incidents, &hours);
    let ages = age_distribution(&incidents);

    info!(peak_hour = hourly.peak_hour(), "Peak crime hour");
    match night.peak_area() {
        Some(area) => info!(peak_area = area, "Peak night-crime location"),
        None => warn!("No incidents fell inside the night window"),
    }
    if ages.unclassified > 0 {
        info!(
            unclassified = ages.unclassified,
            "Records excluded from age brackets (missing or negative age)"
        );
    }

    std::fs::create_dir_all(&cli.output_dir)?;

    charts::render_hourly_chart(&hourly, &cli.output_dir)?;
    if !night.is_empty() {
        charts::render_night_area_chart(&night, &cli.output_dir)?;
    }
    charts::render_age_groups_chart(&ages, &cli.output_dir)?;

    output::write_hourly_csv(&cli.output_dir, &hourly)?;
    output::write_night_area_csv(&cli.output_dir, &night)?;
    output::write_age_groups_csv(&cli.output_dir, &ages)?;

    let summary = CrimeSummary::new(&hourly, &night, &ages);
    output::write_summary(&cli.output_dir, &summary)?;
    output::print_json(&summary)?;

    info!(output_dir = %cli.output_dir.display(), "All outputs saved");
    Ok(())
}
