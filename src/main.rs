//! CLI entry point for the crop production analysis tool.
//!
//! Loads the dataset, runs the aggregation pipeline, prints every summary
//! table, and exports the persisted aggregates as CSV files.

use anyhow::Result;
use clap::Parser;
use crop_analysis::{
    dataset::load_records,
    output::{export_report, print_report, report_json},
    pipeline::aggregate::analyze,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "crop_analysis")]
#[command(about = "Exploratory analysis over a crop production dataset", long_about = None)]
struct Cli {
    /// Path to the crop production CSV
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory to write exported summary CSVs to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also dump the full report as pretty JSON to stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/crop_analysis.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("crop_analysis.log"));

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

    let records = load_records(&cli.input)?;
    let report = analyze(&records);

    print_report(&report);
    export_report(&cli.output_dir, &report)?;

    if cli.json {
        println!("{}", report_json(&report)?);
    }

    info!(
        records = report.record_count,
        output_dir = %cli.output_dir.display(),
        "Analysis complete"
    );
    Ok(())
}
