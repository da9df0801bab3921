//! Grouped aggregation over the in-memory record set.
//!
//! This module turns the flat record collection into named summary tables:
//! totals, means, ratios, a growth series, and a trend line, grouped by
//! year, crop, state, season, and pairs thereof.

pub mod aggregate;
pub mod types;
pub mod utility;
