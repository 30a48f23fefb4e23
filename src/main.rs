//! CLI entry point for the taxi fare analyzer.
//!
//! Provides subcommands for serving the HTTP API and for analyzing a trip
//! CSV directly from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use taxi_fare_analyzer::{
    analyzers::analyze_path,
    output::{print_json, print_pretty, write_report},
    server::{ServerConfig, parse_upload_limit, start_server},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "taxi_fare_analyzer")]
#[command(about = "Find the hours and pickup zones with the highest taxi fares", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "TAXI_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "TAXI_PORT", default_value_t = 5000)]
        port: u16,

        /// Directory uploads are spooled into (defaults to the system temp dir)
        #[arg(long, env = "TAXI_UPLOAD_DIR")]
        upload_dir: Option<PathBuf>,

        /// Largest accepted upload, in MiB
        #[arg(
            long = "max-upload-mb",
            env = "TAXI_MAX_UPLOAD_MB",
            default_value = "512",
            value_parser = parse_upload_limit
        )]
        max_upload_bytes: usize,
    },
    /// Analyze a trip CSV file and log the report
    Analyze {
        /// Path to the trip CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Optional: directory to write best_hours/best_zones CSVs into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/taxi_fare_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("taxi_fare_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            upload_dir,
            max_upload_bytes,
        } => {
            let config = ServerConfig {
                host,
                port,
                upload_dir: upload_dir.unwrap_or_else(std::env::temp_dir),
                max_upload_bytes,
            };
            std::fs::create_dir_all(&config.upload_dir)?;

            start_server(config)?.await?;
            info!("HTTP server stopped");
        }
        Commands::Analyze { source, output_dir } => {
            let report = analyze_path(&source)?;

            print_pretty(&report);
            print_json(&report)?;

            if let Some(dir) = output_dir {
                for path in write_report(&dir, &report)? {
                    info!(path = %path.display(), "Report written");
                }
            }
        }
    }

    Ok(())
}
