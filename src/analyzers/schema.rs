//! Column resolution across the known taxi dataset layouts.

use crate::error::AnalysisError;

/// Fare column names, highest priority first.
pub static FARE_CANDIDATES: &[&str] = &["fare_amount", "total_amount", "fare", "Fare_amount"];

/// Pickup timestamp column names, highest priority first.
pub static PICKUP_TIME_CANDIDATES: &[&str] = &[
    "pickup_datetime",
    "tpep_pickup_datetime",
    "lpep_pickup_datetime",
    "pickup_time",
];

/// Pickup zone column names, highest priority first.
pub static ZONE_CANDIDATES: &[&str] = &[
    "PULocationID",
    "pickup_zone",
    "pickup_location_id",
    "pickup_location",
];

/// A header name together with its position in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

/// The columns an analysis reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub fare: Column,
    pub pickup_time: Column,
    pub zone: Option<Column>,
}

/// Returns the first candidate present in `headers`.
///
/// Priority follows `candidates`, not header order.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<Column> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h == candidate)
            .map(|index| Column {
                name: candidate.to_string(),
                index,
            })
    })
}

/// Resolves fare, pickup time and zone columns.
///
/// # Errors
///
/// [`AnalysisError::MissingColumns`] if no fare or no pickup time column is
/// present. A missing zone column is not an error.
pub fn resolve(headers: &[String]) -> Result<ResolvedSchema, AnalysisError> {
    let fare = find_column(headers, FARE_CANDIDATES);
    let pickup_time = find_column(headers, PICKUP_TIME_CANDIDATES);
    let zone = find_column(headers, ZONE_CANDIDATES);

    match (fare, pickup_time) {
        (Some(fare), Some(pickup_time)) => Ok(ResolvedSchema {
            fare,
            pickup_time,
            zone,
        }),
        _ => Err(AnalysisError::MissingColumns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_priority_beats_header_order() {
        let h = headers(&["total_amount", "VendorID", "fare_amount"]);
        let col = find_column(&h, FARE_CANDIDATES).unwrap();
        assert_eq!(col.name, "fare_amount");
        assert_eq!(col.index, 2);
    }

    #[test]
    fn test_yellow_cab_layout() {
        let h = headers(&[
            "VendorID",
            "tpep_pickup_datetime",
            "tpep_dropoff_datetime",
            "PULocationID",
            "DOLocationID",
            "fare_amount",
            "total_amount",
        ]);
        let schema = resolve(&h).unwrap();

        assert_eq!(schema.fare.name, "fare_amount");
        assert_eq!(schema.pickup_time.name, "tpep_pickup_datetime");
        assert_eq!(schema.pickup_time.index, 1);
        assert_eq!(schema.zone.unwrap().name, "PULocationID");
    }

    #[test]
    fn test_zone_is_optional() {
        let schema = resolve(&headers(&["fare", "pickup_time"])).unwrap();
        assert!(schema.zone.is_none());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let h = headers(&["FARE_AMOUNT", "pickup_datetime"]);
        assert!(matches!(resolve(&h), Err(AnalysisError::MissingColumns)));
    }

    #[test]
    fn test_missing_fare_fails() {
        let h = headers(&["pickup_datetime", "PULocationID"]);
        assert!(matches!(resolve(&h), Err(AnalysisError::MissingColumns)));
    }

    #[test]
    fn test_missing_time_fails() {
        let h = headers(&["fare_amount", "PULocationID"]);
        assert!(matches!(resolve(&h), Err(AnalysisError::MissingColumns)));
    }
}
