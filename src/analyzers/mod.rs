//! Fare aggregation over uploaded trip tables.
//!
//! This module resolves which columns hold the fare, pickup time and pickup
//! zone, derives the hour of day for each trip, and groups fares into the
//! `best_hours` and `best_zones` reports.

pub mod aggregate;
pub mod schema;
pub mod timestamp;
pub mod types;
pub mod utility;

pub use aggregate::{TOP_ZONES, aggregate_trips, analyze_path, analyze_table};
pub use types::{AnalysisReport, HourlySummary, ZoneId, ZoneSummary};
