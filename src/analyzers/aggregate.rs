use crate::analyzers::schema::{ResolvedSchema, resolve};
use crate::analyzers::timestamp::pickup_hour;
use crate::analyzers::types::{AnalysisReport, HourlySummary, ZoneId, ZoneSummary};
use crate::analyzers::utility::{FareAccumulator, is_missing, is_missing_time};
use crate::error::AnalysisError;
use crate::parser::TripTable;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Maximum number of entries in the zone report.
pub const TOP_ZONES: usize = 20;

/// Resolves the schema of `table` and computes the hour and zone reports.
///
/// # Errors
///
/// Fails without partial results if the fare or pickup time column is
/// missing, or if any fare or timestamp cell cannot be parsed.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn analyze_table(table: &TripTable) -> Result<AnalysisReport, AnalysisError> {
    let schema = resolve(&table.headers)?;
    debug!(
        fare = %schema.fare.name,
        pickup_time = %schema.pickup_time.name,
        zone = schema.zone.as_ref().map(|z| z.name.as_str()),
        "Schema resolved"
    );
    aggregate_trips(table, &schema)
}

/// Loads a CSV file from disk and analyzes it.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn analyze_path(path: impl AsRef<Path>) -> Result<AnalysisReport, AnalysisError> {
    let table = TripTable::from_path(path.as_ref())?;
    let report = analyze_table(&table)?;
    info!(
        rows = table.len(),
        hours = report.best_hours.len(),
        zones = report.best_zones.as_ref().map(Vec::len),
        "Trip table analyzed"
    );
    Ok(report)
}

/// Groups trips by pickup hour and, when a zone column is present, by zone.
///
/// A row with a missing fare is skipped entirely. A row with a missing
/// pickup time still counts toward its zone; a row with a missing zone
/// still counts toward its hour.
pub fn aggregate_trips(
    table: &TripTable,
    schema: &ResolvedSchema,
) -> Result<AnalysisReport, AnalysisError> {
    let numeric_zones = schema
        .zone
        .as_ref()
        .is_some_and(|zone| zone_column_is_numeric(table, zone.index));

    let mut hours: BTreeMap<u32, FareAccumulator> = BTreeMap::new();
    let mut zones: BTreeMap<ZoneId, FareAccumulator> = BTreeMap::new();
    let mut skipped = 0usize;

    for (i, record) in table.rows.iter().enumerate() {
        let row = i + 1;

        let time_cell = record.get(schema.pickup_time.index).unwrap_or("");
        let hour = if is_missing_time(time_cell) {
            None
        } else {
            Some(pickup_hour(time_cell).ok_or_else(|| AnalysisError::Timestamp {
                row,
                value: time_cell.to_string(),
            })?)
        };

        let fare_cell = record.get(schema.fare.index).unwrap_or("");
        if is_missing(fare_cell) {
            skipped += 1;
            continue;
        }
        let fare = parse_fare(fare_cell).ok_or_else(|| AnalysisError::Fare {
            row,
            value: fare_cell.to_string(),
        })?;

        if let Some(hour) = hour {
            hours.entry(hour).or_default().push(fare);
        }

        if let Some(zone) = &schema.zone {
            let zone_cell = record.get(zone.index).unwrap_or("");
            if !is_missing(zone_cell) {
                zones
                    .entry(zone_key(zone_cell, numeric_zones))
                    .or_default()
                    .push(fare);
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "Rows without a fare were left out");
    }

    let mut best_hours: Vec<HourlySummary> = hours
        .into_iter()
        .map(|(pickup_hour, acc)| HourlySummary {
            pickup_hour,
            avg_fare: acc.mean(),
            trip_count: acc.count,
            total_fare: acc.total,
        })
        .collect();
    best_hours.sort_by(|a, b| b.avg_fare.total_cmp(&a.avg_fare));

    let best_zones = schema.zone.as_ref().map(|zone| {
        let mut summaries: Vec<ZoneSummary> = zones
            .into_iter()
            .map(|(id, acc)| ZoneSummary {
                zone_column: zone.name.clone(),
                zone: id,
                avg_fare: acc.mean(),
                trip_count: acc.count,
                total_fare: acc.total,
            })
            .collect();
        summaries.sort_by(|a, b| b.avg_fare.total_cmp(&a.avg_fare));
        summaries.truncate(TOP_ZONES);
        summaries
    });

    Ok(AnalysisReport {
        best_hours,
        best_zones,
    })
}

fn parse_fare(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn zone_column_is_numeric(table: &TripTable, index: usize) -> bool {
    table
        .rows
        .iter()
        .filter_map(|r| r.get(index))
        .filter(|cell| !is_missing(cell))
        .all(|cell| cell.parse::<i64>().is_ok())
}

fn zone_key(cell: &str, numeric: bool) -> ZoneId {
    if numeric {
        if let Ok(code) = cell.parse::<i64>() {
            return ZoneId::Code(code);
        }
    }
    ZoneId::Name(cell.to_string())
}
