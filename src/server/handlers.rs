use crate::analyzers::analyze_path;
use crate::error::{DownloadError, UploadError};
use crate::output::{records_to_csv, report_file_name};
use crate::server::ServerConfig;
use crate::server::upload::store_csv_upload;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Reported by the health endpoint as the analysis backend.
pub const ENGINE: &str = "rust-csv";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    engine: &'static str,
}

/// Body of a download request: a report type tag and its records.
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(rename = "type", default = "default_report_type")]
    pub report_type: String,
    #[serde(default)]
    pub results: Vec<Value>,
}

fn default_report_type() -> String {
    "best_hours".to_string()
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        engine: ENGINE,
    })
}

#[post("/analyze")]
pub async fn analyze(
    config: web::Data<ServerConfig>,
    payload: Multipart,
) -> Result<HttpResponse, UploadError> {
    let upload = match store_csv_upload(payload, &config.upload_dir, config.max_upload_bytes).await
    {
        Ok(upload) => upload,
        Err(e) => {
            warn!(error = %e, "Upload rejected");
            return Err(e);
        }
    };

    let file_name = upload.file_name.clone();
    info!(file_name = %file_name, bytes = upload.size, "Analyzing upload");

    // The temp file is removed when `upload` drops at the end of the closure.
    let result = web::block(move || analyze_path(upload.path()))
        .await
        .map_err(|e| UploadError::Blocking(e.to_string()))?;

    match result {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(e) => {
            warn!(file_name = %file_name, error = %e, "Analysis failed");
            Err(e.into())
        }
    }
}

#[post("/download")]
pub async fn download(body: web::Bytes) -> Result<HttpResponse, DownloadError> {
    let request: DownloadRequest = serde_json::from_slice(&body)?;
    let csv = records_to_csv(&request.results)?;
    let file_name = report_file_name(&request.report_type);

    info!(
        report_type = %request.report_type,
        records = request.results.len(),
        "Serving report download"
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(csv))
}
