//! Output formatting and persistence for analysis reports.
//!
//! Converts lists of JSON records into CSV for download, and writes or logs
//! full reports for the command line.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::AnalysisReport;
use crate::error::DownloadError;
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Logs an analysis report using Rust's debug pretty-print format.
pub fn print_pretty(report: &AnalysisReport) {
    debug!("{:#?}", report);
}

/// Logs an analysis report as pretty-printed JSON.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Serializes a list of flat JSON objects as CSV with a header row.
///
/// Columns are the union of all record keys in first-seen order. Missing
/// keys and `null` become empty cells, and nested values are written as
/// compact JSON. An empty list produces an empty document.
pub fn records_to_csv(records: &[Value]) -> Result<Vec<u8>, DownloadError> {
    let mut columns: Vec<&str> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or(DownloadError::NotAnObject(i))?;
        for key in object.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in records {
        // Checked above.
        let Some(object) = record.as_object() else {
            continue;
        };
        let cells: Vec<String> = columns
            .iter()
            .map(|col| object.get(*col).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&cells)?;
    }

    writer
        .into_inner()
        .map_err(|e| DownloadError::Io(e.into_error()))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Serializes any list of records to CSV through their JSON form.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<Vec<u8>, DownloadError> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    records_to_csv(&values)
}

/// File name a report of the given type is downloaded as.
///
/// Characters outside `[A-Za-z0-9_.-]` are replaced with `_`.
pub fn report_file_name(report_type: &str) -> String {
    let safe: String = report_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_analysis.csv")
}

/// Writes `best_hours_analysis.csv` and, if present, `best_zones_analysis.csv`
/// into `dir`, returning the paths written.
pub fn write_report(dir: impl AsRef<Path>, report: &AnalysisReport) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();

    let path = dir.join(report_file_name("best_hours"));
    std::fs::write(&path, to_csv(&report.best_hours)?)?;
    debug!(path = %path.display(), rows = report.best_hours.len(), "Wrote hourly report");
    written.push(path);

    if let Some(zones) = &report.best_zones {
        let path = dir.join(report_file_name("best_zones"));
        std::fs::write(&path, to_csv(zones)?)?;
        debug!(path = %path.display(), rows = zones.len(), "Wrote zone report");
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{HourlySummary, ZoneId, ZoneSummary};
    use serde_json::json;
    use std::fs;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            best_hours: vec![HourlySummary {
                pickup_hour: 8,
                avg_fare: 15.0,
                trip_count: 2,
                total_fare: 30.0,
            }],
            best_zones: Some(vec![ZoneSummary {
                zone_column: "PULocationID".to_string(),
                zone: ZoneId::Code(132),
                avg_fare: 52.5,
                trip_count: 2,
                total_fare: 105.0,
            }]),
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_report()).unwrap();
    }

    #[test]
    fn test_records_to_csv_hours() {
        let records = vec![
            json!({"pickup_hour": 8, "avg_fare": 15.0, "trip_count": 2, "total_fare": 30.0}),
            json!({"pickup_hour": 20, "avg_fare": 5.5, "trip_count": 1, "total_fare": 5.5}),
        ];
        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();

        assert_eq!(
            csv,
            "pickup_hour,avg_fare,trip_count,total_fare\n8,15.0,2,30.0\n20,5.5,1,5.5\n"
        );
    }

    #[test]
    fn test_records_to_csv_union_of_keys() {
        let records = vec![json!({"a": 1}), json!({"b": "x,y", "a": null})];
        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();

        assert_eq!(csv, "a,b\n1,\n,\"x,y\"\n");
    }

    #[test]
    fn test_records_to_csv_nested_values() {
        let records = vec![json!({"tags": [1, 2], "ok": true})];
        let csv = String::from_utf8(records_to_csv(&records).unwrap()).unwrap();

        assert_eq!(csv, "tags,ok\n\"[1,2]\",true\n");
    }

    #[test]
    fn test_records_to_csv_empty() {
        assert!(records_to_csv(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_records_to_csv_rejects_scalars() {
        let records = vec![json!({"a": 1}), json!(3)];
        assert!(matches!(
            records_to_csv(&records),
            Err(DownloadError::NotAnObject(1))
        ));
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("best_hours"), "best_hours_analysis.csv");
        assert_eq!(report_file_name("../x y"), ".._x_y_analysis.csv");
    }

    #[test]
    fn test_write_report_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_report(dir.path(), &sample_report()).unwrap();

        assert_eq!(written.len(), 2);
        let zones = fs::read_to_string(dir.path().join("best_zones_analysis.csv")).unwrap();
        assert_eq!(
            zones,
            "PULocationID,avg_fare,trip_count,total_fare\n132,52.5,2,105.0\n"
        );
    }

    #[test]
    fn test_write_report_without_zones() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = sample_report();
        report.best_zones = None;

        let written = write_report(dir.path(), &report).unwrap();

        assert_eq!(written.len(), 1);
        assert!(!dir.path().join("best_zones_analysis.csv").exists());
    }
}
