//! Error types for analysis, upload handling and report download.
//!
//! Each enum maps onto the HTTP status the service answers with; the
//! `Display` text is what ends up in the `{"error": ...}` body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failures while resolving the schema of a trip table or aggregating it.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Required columns not found. Please ensure CSV has fare and pickup time columns.")]
    MissingColumns,

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: fare value '{value}' is not a number")]
    Fare { row: usize, value: String },

    #[error("row {row}: pickup time '{value}' is not a recognized timestamp")]
    Timestamp { row: usize, value: String },

    #[error("row {row}: expected {expected} fields, found {found}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of the `/api/analyze` endpoint.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file provided")]
    NoFile,

    #[error("No file selected")]
    NoFilename,

    #[error("Only CSV files are allowed")]
    BadExtension,

    #[error("File too large (limit is {limit} bytes)")]
    TooLarge { limit: usize },

    #[error("invalid multipart payload: {0}")]
    Multipart(String),

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("analysis task failed: {0}")]
    Blocking(String),
}

/// Failures of the `/api/download` endpoint.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("record {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn json_error(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

impl ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::Io(_) | UploadError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}

impl ResponseError for DownloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        json_error(self.status_code(), self.to_string())
    }
}
