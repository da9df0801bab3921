//! Row types produced by the aggregation pipeline.
//!
//! Serde renames follow the source dataset's column names so that exported
//! CSVs carry the same headers the records were loaded with. Undefined
//! ratios (zero total area, first-year growth) are `None` and serialize as
//! empty CSV fields.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Total production for a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProduction {
    #[serde(rename = "Crop_Year")]
    pub year: i32,
    #[serde(rename = "Production")]
    pub production: f64,
}

/// Year totals annotated with percent change against the previous year.
/// The first year has no predecessor, so its rate is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGrowth {
    #[serde(rename = "Crop_Year")]
    pub year: i32,
    #[serde(rename = "Production")]
    pub production: f64,
    #[serde(rename = "Growth_Rate")]
    pub growth_rate: Option<f64>,
}

impl YearGrowth {
    /// Column names for CSV export, matching the serde renames above.
    pub const CSV_HEADER: [&'static str; 3] = ["Crop_Year", "Production", "Growth_Rate"];
}

/// Degree-1 least-squares fit of total production over year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropProduction {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

impl CropProduction {
    pub const CSV_HEADER: [&'static str; 2] = ["Crop", "Production"];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropArea {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Area")]
    pub area: f64,
}

/// Mean of per-record yield for a crop, over records whose yield is
/// defined. `None` when no record in the group has a defined yield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropYield {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Yield")]
    pub avg_yield: Option<f64>,
}

impl CropYield {
    pub const CSV_HEADER: [&'static str; 2] = ["Crop", "Yield"];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearCropProduction {
    #[serde(rename = "Crop_Year")]
    pub year: i32,
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateProduction {
    #[serde(rename = "State_Name")]
    pub state: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCropProduction {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "State_Name")]
    pub state: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

/// Highest- and lowest-producing state for one crop. Ties go to the first
/// state in sorted name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropExtremes {
    pub crop: String,
    pub max_state: String,
    pub max_production: f64,
    pub min_state: String,
    pub min_production: f64,
}

/// Ratio of summed production to summed area for a state. `None` when the
/// state's total area is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateEfficiency {
    #[serde(rename = "State_Name")]
    pub state: String,
    #[serde(rename = "Efficiency")]
    pub efficiency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonProduction {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonCropProduction {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Production")]
    pub production: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonEfficiency {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Yield_Efficiency")]
    pub efficiency: Option<f64>,
}

/// Every summary table computed from one dataset, plus run metadata.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,

    // trend analysis
    pub total_production_by_year: Vec<YearProduction>,
    pub annual_growth: Vec<YearGrowth>,
    pub trend_line: Option<TrendLine>,

    // crop-wise analysis
    pub total_production_by_crop: Vec<CropProduction>,
    pub average_area_by_crop: Vec<CropArea>,
    pub yield_by_crop: Vec<CropYield>,
    pub crop_production_trends: Vec<YearCropProduction>,

    // state-wise comparison
    pub total_production_by_state: Vec<StateProduction>,
    pub production_extremes_by_crop: Vec<CropExtremes>,
    pub production_efficiency_by_state: Vec<StateEfficiency>,
    pub top_producing_states: Vec<StateCropProduction>,

    // seasonal analysis
    pub total_production_by_season: Vec<SeasonProduction>,
    pub crop_production_by_season: Vec<SeasonCropProduction>,
    pub yield_efficiency_by_season: Vec<SeasonEfficiency>,
}
