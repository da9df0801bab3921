//! Dataset loading and typed record access.
//!
//! The input is a flat CSV of crop-production records. The header is
//! validated against the expected columns before any row is read, so
//! column drift fails fast instead of silently producing empty groups.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Columns the input file must carry, in order. `District_Name` is present
/// in the source data but not used by any aggregate.
pub const EXPECTED_HEADER: [&str; 7] = [
    "State_Name",
    "District_Name",
    "Crop_Year",
    "Season",
    "Crop",
    "Area",
    "Production",
];

/// One row of the crop-production dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "State_Name")]
    pub state_name: String,
    #[serde(rename = "Crop_Year")]
    pub crop_year: i32,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Production")]
    pub production: f64,
}

impl CropRecord {
    /// Production per unit of cultivated area. Undefined when the record
    /// covers no area.
    pub fn yield_ratio(&self) -> Option<f64> {
        if self.area == 0.0 {
            None
        } else {
            Some(self.production / self.area)
        }
    }
}

/// Reads the whole dataset into memory.
///
/// Leading and trailing whitespace is trimmed from every field; the source
/// data pads some `Season` values.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the header does not match
/// [`EXPECTED_HEADER`], or any row fails to parse.
pub fn load_records(path: &Path) -> Result<Vec<CropRecord>> {
    debug!(path = %path.display(), "Opening dataset");

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(EXPECTED_HEADER) {
        bail!(
            "unexpected header in {}: got [{}], expected [{}]",
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", "),
            EXPECTED_HEADER.join(", ")
        );
    }

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        // +2: one for the header row, one for 1-based line numbers
        let record: CropRecord =
            result.with_context(|| format!("malformed record at line {}", i + 2))?;
        records.push(record);
    }

    info!(records = records.len(), "Dataset loaded");
    Ok(records)
}
