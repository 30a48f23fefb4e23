//! HTTP API: health check, CSV analysis and report download under `/api`.

mod handlers;
pub mod upload;

pub use handlers::{DownloadRequest, ENGINE};

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, dev::Server, web};
use std::path::PathBuf;
use tracing::info;

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploads are spooled into while being analyzed.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            upload_dir: std::env::temp_dir(),
            max_upload_bytes: 512 * 1024 * 1024,
        }
    }
}

/// Parses an upload limit given in MiB into bytes.
///
/// Used as the clap value parser for `--max-upload-mb`; values whose byte
/// count overflows `usize` are rejected.
pub fn parse_upload_limit(mib: &str) -> Result<usize, String> {
    let mib: usize = mib
        .trim()
        .parse()
        .map_err(|e| format!("invalid upload limit '{mib}': {e}"))?;
    mib.checked_mul(1024 * 1024)
        .ok_or_else(|| format!("upload limit of {mib} MiB is too large"))
}

/// Registers the `/api` routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::health)
            .service(handlers::analyze)
            .service(handlers::download),
    );
}

/// Binds the service and returns the running server future.
pub fn start_server(config: ServerConfig) -> std::io::Result<Server> {
    let addr = (config.host.clone(), config.port);
    let payload_limit = config.max_upload_bytes;

    info!(
        host = %config.host,
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        max_upload_bytes = config.max_upload_bytes,
        "Starting HTTP server"
    );

    let state = web::Data::new(config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(routes)
    })
    .bind(addr)?
    .run();

    Ok(server)
}
