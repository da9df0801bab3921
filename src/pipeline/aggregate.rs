//! The aggregation pipeline: grouped sums, means, and ratios over the
//! record set.
//!
//! Each function takes the immutable record slice and returns a fresh
//! summary table; nothing here mutates shared state, so the whole report is
//! a pure function of the input. Group iteration goes through `BTreeMap`,
//! which fixes row order to the grouping key's sort order and makes the
//! argmax/argmin tie-break deterministic (first state in name order wins).

use crate::dataset::CropRecord;
use crate::pipeline::types::{
    AnalysisReport, CropArea, CropExtremes, CropProduction, CropYield, SeasonCropProduction,
    SeasonEfficiency, SeasonProduction, StateCropProduction, StateEfficiency, StateProduction,
    TrendLine, YearCropProduction, YearGrowth, YearProduction,
};
use crate::pipeline::utility::{linear_fit, mean};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Runs every aggregate and collects the results into one report.
pub fn analyze(records: &[CropRecord]) -> AnalysisReport {
    debug!(records = records.len(), "Running aggregation pipeline");

    let by_year = total_production_by_year(records);
    let annual_growth = growth_rates(&by_year);
    let trend = trend_line(&by_year);

    AnalysisReport {
        generated_at: Utc::now(),
        record_count: records.len(),
        total_production_by_year: by_year,
        annual_growth,
        trend_line: trend,
        total_production_by_crop: total_production_by_crop(records),
        average_area_by_crop: average_area_by_crop(records),
        yield_by_crop: yield_by_crop(records),
        crop_production_trends: crop_production_trends(records),
        total_production_by_state: total_production_by_state(records),
        production_extremes_by_crop: production_extremes_by_crop(records),
        production_efficiency_by_state: production_efficiency_by_state(records),
        top_producing_states: top_producing_states(records),
        total_production_by_season: total_production_by_season(records),
        crop_production_by_season: crop_production_by_season(records),
        yield_efficiency_by_season: yield_efficiency_by_season(records),
    }
}

/// Sum of production per year, ascending by year.
pub fn total_production_by_year(records: &[CropRecord]) -> Vec<YearProduction> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.crop_year).or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|(year, production)| YearProduction { year, production })
        .collect()
}

/// Percent change of yearly totals against the previous year. The first
/// year has no baseline and gets `None`.
pub fn growth_rates(year_totals: &[YearProduction]) -> Vec<YearGrowth> {
    let mut prev: Option<f64> = None;
    year_totals
        .iter()
        .map(|row| {
            let growth_rate = prev.map(|p| (row.production - p) / p * 100.0);
            prev = Some(row.production);
            YearGrowth {
                year: row.year,
                production: row.production,
                growth_rate,
            }
        })
        .collect()
}

/// Degree-1 fit of yearly totals. `None` when fewer than two years.
pub fn trend_line(year_totals: &[YearProduction]) -> Option<TrendLine> {
    let points: Vec<(f64, f64)> = year_totals
        .iter()
        .map(|row| (row.year as f64, row.production))
        .collect();
    linear_fit(&points).map(|(slope, intercept)| TrendLine { slope, intercept })
}

/// Sum of production per crop.
pub fn total_production_by_crop(records: &[CropRecord]) -> Vec<CropProduction> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.crop.clone()).or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|(crop, production)| CropProduction { crop, production })
        .collect()
}

/// Mean cultivated area per crop.
pub fn average_area_by_crop(records: &[CropRecord]) -> Vec<CropArea> {
    let mut areas: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in records {
        areas.entry(r.crop.clone()).or_default().push(r.area);
    }
    areas
        .into_iter()
        .map(|(crop, values)| CropArea {
            crop,
            area: mean(&values),
        })
        .collect()
}

/// Mean of per-record yield per crop, skipping records with zero area.
/// A crop whose every record has zero area gets `None`.
pub fn yield_by_crop(records: &[CropRecord]) -> Vec<CropYield> {
    let mut yields: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in records {
        let entry = yields.entry(r.crop.clone()).or_default();
        if let Some(y) = r.yield_ratio() {
            entry.push(y);
        }
    }
    yields
        .into_iter()
        .map(|(crop, values)| CropYield {
            crop,
            avg_yield: if values.is_empty() {
                None
            } else {
                Some(mean(&values))
            },
        })
        .collect()
}

/// Sum of production per (year, crop) pair.
pub fn crop_production_trends(records: &[CropRecord]) -> Vec<YearCropProduction> {
    let mut totals: BTreeMap<(i32, String), f64> = BTreeMap::new();
    for r in records {
        *totals.entry((r.crop_year, r.crop.clone())).or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|((year, crop), production)| YearCropProduction {
            year,
            crop,
            production,
        })
        .collect()
}

/// Sum of production per state.
pub fn total_production_by_state(records: &[CropRecord]) -> Vec<StateProduction> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.state_name.clone()).or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|(state, production)| StateProduction { state, production })
        .collect()
}

/// Per crop, the states with the highest and lowest summed production.
/// States are visited in sorted name order and comparisons are strict, so a
/// tie resolves to the first state in that order.
pub fn production_extremes_by_crop(records: &[CropRecord]) -> Vec<CropExtremes> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for r in records {
        *totals
            .entry((r.crop.clone(), r.state_name.clone()))
            .or_default() += r.production;
    }

    let mut per_crop: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
    for ((crop, state), production) in totals {
        per_crop.entry(crop).or_default().push((state, production));
    }

    per_crop
        .into_iter()
        .map(|(crop, states)| {
            let mut max = &states[0];
            let mut min = &states[0];
            for candidate in &states[1..] {
                if candidate.1 > max.1 {
                    max = candidate;
                }
                if candidate.1 < min.1 {
                    min = candidate;
                }
            }
            CropExtremes {
                crop,
                max_state: max.0.clone(),
                max_production: max.1,
                min_state: min.0.clone(),
                min_production: min.1,
            }
        })
        .collect()
}

/// sum(production) / sum(area) ratio per state; `None` for zero total area.
pub fn production_efficiency_by_state(records: &[CropRecord]) -> Vec<StateEfficiency> {
    let mut sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = sums.entry(r.state_name.clone()).or_default();
        entry.0 += r.production;
        entry.1 += r.area;
    }
    sums.into_iter()
        .map(|(state, (production, area))| StateEfficiency {
            state,
            efficiency: if area == 0.0 {
                None
            } else {
                Some(production / area)
            },
        })
        .collect()
}

/// Production summed per (crop, state), all rows sorted descending by
/// production. The sort is stable, so ties keep (crop, state) key order.
pub fn top_producing_states(records: &[CropRecord]) -> Vec<StateCropProduction> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for r in records {
        *totals
            .entry((r.crop.clone(), r.state_name.clone()))
            .or_default() += r.production;
    }

    let mut rows: Vec<StateCropProduction> = totals
        .into_iter()
        .map(|((crop, state), production)| StateCropProduction {
            crop,
            state,
            production,
        })
        .collect();
    rows.sort_by(|a, b| b.production.total_cmp(&a.production));
    rows
}

/// Sum of production per season.
pub fn total_production_by_season(records: &[CropRecord]) -> Vec<SeasonProduction> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.season.clone()).or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|(season, production)| SeasonProduction { season, production })
        .collect()
}

/// Sum of production per (season, crop) pair.
pub fn crop_production_by_season(records: &[CropRecord]) -> Vec<SeasonCropProduction> {
    let mut totals: BTreeMap<(String, String), f64> = BTreeMap::new();
    for r in records {
        *totals
            .entry((r.season.clone(), r.crop.clone()))
            .or_default() += r.production;
    }
    totals
        .into_iter()
        .map(|((season, crop), production)| SeasonCropProduction {
            season,
            crop,
            production,
        })
        .collect()
}

/// sum(production) / sum(area) ratio per season; `None` for zero total area.
pub fn yield_efficiency_by_season(records: &[CropRecord]) -> Vec<SeasonEfficiency> {
    let mut sums: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = sums.entry(r.season.clone()).or_default();
        entry.0 += r.production;
        entry.1 += r.area;
    }
    sums.into_iter()
        .map(|(season, (production, area))| SeasonEfficiency {
            season,
            efficiency: if area == 0.0 {
                None
            } else {
                Some(production / area)
            },
        })
        .collect()
}
