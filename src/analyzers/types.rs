//! Report types produced by the aggregation pipeline.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Fare statistics for one hour of the day.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HourlySummary {
    pub pickup_hour: u32,
    pub avg_fare: f64,
    pub trip_count: u64,
    pub total_fare: f64,
}

/// A pickup zone key. Numeric location codes stay numeric in JSON.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ZoneId {
    Code(i64),
    Name(String),
}

impl Serialize for ZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ZoneId::Code(code) => serializer.serialize_i64(*code),
            ZoneId::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Code(code) => write!(f, "{code}"),
            ZoneId::Name(name) => f.write_str(name),
        }
    }
}

/// Fare statistics for one pickup zone.
///
/// Serializes with the zone under its source column name, e.g.
/// `{"PULocationID": 132, "avg_fare": ..., ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSummary {
    pub zone_column: String,
    pub zone: ZoneId,
    pub avg_fare: f64,
    pub trip_count: u64,
    pub total_fare: f64,
}

impl Serialize for ZoneSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.zone_column, &self.zone)?;
        map.serialize_entry("avg_fare", &self.avg_fare)?;
        map.serialize_entry("trip_count", &self.trip_count)?;
        map.serialize_entry("total_fare", &self.total_fare)?;
        map.end()
    }
}

/// Result of analyzing one trip table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisReport {
    pub best_hours: Vec<HourlySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_zones: Option<Vec<ZoneSummary>>,
}
