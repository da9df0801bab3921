use crop_analysis::dataset::load_records;
use crop_analysis::output::export_report;
use crop_analysis::pipeline::aggregate::analyze;
use std::path::{Path, PathBuf};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_crops.csv")
}

#[test]
fn test_full_pipeline() {
    let records = load_records(&fixture_path()).expect("Failed to load fixture");
    assert_eq!(records.len(), 12);

    let report = analyze(&records);

    assert_eq!(report.record_count, 12);
    assert_eq!(report.total_production_by_year.len(), 3);
    assert_eq!(report.total_production_by_crop.len(), 3);
    assert_eq!(report.total_production_by_state.len(), 3);
    assert_eq!(report.total_production_by_season.len(), 3);

    // season labels arrive trimmed
    assert_eq!(report.total_production_by_season[2].season, "Whole Year");

    // the grand total is the same along every dimension
    let grand: f64 = records.iter().map(|r| r.production).sum();
    let year_sum: f64 = report
        .total_production_by_year
        .iter()
        .map(|r| r.production)
        .sum();
    let crop_sum: f64 = report
        .total_production_by_crop
        .iter()
        .map(|r| r.production)
        .sum();
    let state_sum: f64 = report
        .total_production_by_state
        .iter()
        .map(|r| r.production)
        .sum();
    assert_eq!(year_sum, grand);
    assert_eq!(crop_sum, grand);
    assert_eq!(state_sum, grand);

    // 2000 totals from the fixture
    assert_eq!(report.total_production_by_year[0].year, 2000);
    assert_eq!(report.total_production_by_year[0].production, 34100.0);

    // first year has no growth baseline
    assert_eq!(report.annual_growth[0].growth_rate, None);
    assert!(report.annual_growth[1].growth_rate.unwrap() > 0.0);
    assert!(report.annual_growth[2].growth_rate.unwrap() < 0.0);

    assert!(report.trend_line.is_some());

    // Rice: Andhra Pradesh leads; Karnataka and Punjab tie for the minimum,
    // so the first state in name order is reported
    let rice = report
        .production_extremes_by_crop
        .iter()
        .find(|e| e.crop == "Rice")
        .unwrap();
    assert_eq!(rice.max_state, "Andhra Pradesh");
    assert_eq!(rice.max_production, 7800.0);
    assert_eq!(rice.min_state, "Karnataka");
    assert_eq!(rice.min_production, 5400.0);

    // highest (crop, state) total overall
    assert_eq!(report.top_producing_states[0].crop, "Sugarcane");
    assert_eq!(report.top_producing_states[0].state, "Karnataka");
    assert_eq!(report.top_producing_states[0].production, 38700.0);

    // Rabi efficiency = 30900 / 8000
    let rabi = report
        .yield_efficiency_by_season
        .iter()
        .find(|s| s.season == "Rabi")
        .unwrap();
    assert_eq!(rabi.efficiency, Some(3.8625));
}

#[test]
fn test_export_empty_input_keeps_header_rows() {
    let report = analyze(&[]);

    let dir = std::env::temp_dir().join("crop_analysis_empty_export_test");
    let _ = std::fs::remove_dir_all(&dir);

    export_report(&dir, &report).expect("Failed to export empty report");

    let year_csv = std::fs::read_to_string(dir.join("total_production_by_year.csv")).unwrap();
    let crop_csv = std::fs::read_to_string(dir.join("total_production_by_crop.csv")).unwrap();
    let yield_csv = std::fs::read_to_string(dir.join("yield_by_crop.csv")).unwrap();

    // header row and nothing else
    assert_eq!(year_csv, "Crop_Year,Production,Growth_Rate\n");
    assert_eq!(crop_csv, "Crop,Production\n");
    assert_eq!(yield_csv, "Crop,Yield\n");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_is_reproducible() {
    let records = load_records(&fixture_path()).expect("Failed to load fixture");
    let report = analyze(&records);

    let dir = std::env::temp_dir().join("crop_analysis_export_test");
    let _ = std::fs::remove_dir_all(&dir);

    export_report(&dir, &report).expect("Failed to export report");

    let year_csv = std::fs::read_to_string(dir.join("total_production_by_year.csv")).unwrap();
    let crop_csv = std::fs::read_to_string(dir.join("total_production_by_crop.csv")).unwrap();
    let yield_csv = std::fs::read_to_string(dir.join("yield_by_crop.csv")).unwrap();

    assert!(year_csv.starts_with("Crop_Year,Production,Growth_Rate\n"));
    assert!(crop_csv.starts_with("Crop,Production\n"));
    assert!(yield_csv.starts_with("Crop,Yield\n"));

    // header + one row per year / crop
    assert_eq!(year_csv.lines().count(), 4);
    assert_eq!(crop_csv.lines().count(), 4);
    assert_eq!(yield_csv.lines().count(), 4);

    // re-running the pipeline writes byte-identical tables
    let report2 = analyze(&records);
    export_report(&dir, &report2).expect("Failed to export report");
    let year_csv2 = std::fs::read_to_string(dir.join("total_production_by_year.csv")).unwrap();
    assert_eq!(year_csv, year_csv2);

    std::fs::remove_dir_all(&dir).unwrap();
}
