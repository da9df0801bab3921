//! Output formatting and persistence for summary tables.
//!
//! Supports table dumps via tracing, JSON serialization of the full report,
//! and CSV export for the persisted aggregates.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::pipeline::types::{AnalysisReport, CropProduction, CropYield, YearGrowth};

/// Logs one summary table, one row per line.
pub fn print_table<T: Debug>(name: &str, rows: &[T]) {
    info!(table = name, rows = rows.len(), "Summary table");
    for row in rows {
        info!(table = name, "{:?}", row);
    }
}

/// Logs every summary table in the report.
pub fn print_report(report: &AnalysisReport) {
    print_table("total_production_by_year", &report.total_production_by_year);
    print_table("annual_growth", &report.annual_growth);
    match &report.trend_line {
        Some(line) => info!(table = "trend_line", "{:?}", line),
        None => info!(table = "trend_line", "undefined (fewer than two years)"),
    }
    print_table("total_production_by_crop", &report.total_production_by_crop);
    print_table("average_area_by_crop", &report.average_area_by_crop);
    print_table("yield_by_crop", &report.yield_by_crop);
    print_table("crop_production_trends", &report.crop_production_trends);
    print_table("total_production_by_state", &report.total_production_by_state);
    print_table("production_extremes_by_crop", &report.production_extremes_by_crop);
    print_table(
        "production_efficiency_by_state",
        &report.production_efficiency_by_state,
    );
    print_table("top_producing_states", &report.top_producing_states);
    print_table("total_production_by_season", &report.total_production_by_season);
    print_table("crop_production_by_season", &report.crop_production_by_season);
    print_table("yield_efficiency_by_season", &report.yield_efficiency_by_season);
}

/// Serializes the full report as pretty-printed JSON.
pub fn report_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes one summary table to a CSV file with a header row and no index
/// column. The file is replaced on each run.
///
/// The header is written explicitly so an empty table still produces a
/// file with a header row.
pub fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports the three persisted aggregates into `dir`, creating it if needed:
/// year totals (with the growth-rate column), crop totals, and crop yields.
pub fn export_report(dir: &Path, report: &AnalysisReport) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    write_table(
        &dir.join("total_production_by_year.csv"),
        &YearGrowth::CSV_HEADER,
        &report.annual_growth,
    )?;
    write_table(
        &dir.join("total_production_by_crop.csv"),
        &CropProduction::CSV_HEADER,
        &report.total_production_by_crop,
    )?;
    write_table(
        &dir.join("yield_by_crop.csv"),
        &CropYield::CSV_HEADER,
        &report.yield_by_crop,
    )?;

    info!(dir = %dir.display(), "Exported summary tables");
    Ok(())
}
