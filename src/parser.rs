//! CSV loader for uploaded taxi-trip tables.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::AnalysisError;

/// A headered CSV table held as raw string records.
///
/// Cells are kept as text; typing happens per column once the schema is
/// resolved.
#[derive(Debug, Clone, Default)]
pub struct TripTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl TripTable {
    /// Reads a trip table from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a trip table from any byte source.
    ///
    /// Short rows are kept as-is and read as missing trailing cells; rows
    /// with more fields than the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(String::is_empty) {
            return Err(AnalysisError::Csv(csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "no columns to parse from file",
            ))));
        }

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(AnalysisError::RowLength {
                    row: i + 1,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
